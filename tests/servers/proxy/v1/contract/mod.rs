mod announce;
mod errors;
mod pass_through;
