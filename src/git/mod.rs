pub mod blame_parser;
pub mod command;
pub mod log_parser;
pub mod ls_tree;
