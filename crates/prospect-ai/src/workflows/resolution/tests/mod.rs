mod alignment;
mod common;
mod matcher;
