mod common;
mod standard;
