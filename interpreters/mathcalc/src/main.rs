use clap::Parser;
use relish_cli::{launch, Args};
use relish_mathcalc::MathCalc;

fn main() {
    let mut args = Args::parse();
    args.prompt.get_or_insert_with(|| "math> ".to_string());
    args.hello
        .get_or_insert_with(|| "Welcome to the arithmetic calculator!".to_string());

    if let Err(err) = launch(Box::new(MathCalc::new()), args) {
        eprintln!("mathcalc: {err}");
        std::process::exit(1);
    }
}
