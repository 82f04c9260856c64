mod errors;
mod trans;
