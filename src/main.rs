mod app;
mod catalog;
mod cli;
mod constants;
mod domain;
mod parser;
mod storage;

fn main() {
    cli::run_cli();
}
