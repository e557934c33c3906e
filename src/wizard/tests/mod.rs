mod common;

mod editor;
