mod engine;
mod menu;
mod support;
