use clap::Parser;
use relish::EchoInterpreter;
use relish_cli::{launch, Args};

fn main() {
    let args = Args::parse();
    if let Err(err) = launch(Box::new(EchoInterpreter::new()), args) {
        eprintln!("relish: {err}");
        std::process::exit(1);
    }
}
