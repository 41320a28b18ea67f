use clap::Parser;
use relish_boolcalc::BoolCalc;
use relish_cli::{launch, Args};

fn main() {
    let mut args = Args::parse();
    args.prompt.get_or_insert_with(|| "bool> ".to_string());
    args.hello
        .get_or_insert_with(|| "Welcome to the boolean calculator!".to_string());

    if let Err(err) = launch(Box::new(BoolCalc::new()), args) {
        eprintln!("boolcalc: {err}");
        std::process::exit(1);
    }
}
