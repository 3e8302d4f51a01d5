// Run with:
//     cargo run --example naval_fate -- ship new Enterprise
//     cargo run --example naval_fate -- ship move Enterprise 1 2 --speed=20
//     cargo run --example naval_fate -- -h

use usagematch::{parse, Request};

const DOC: &str = "\
Naval Fate.

Usage:
  naval_fate ship new <name>...
  naval_fate ship <name> move <x> <y> [--speed=<kn>]
  naval_fate ship shoot <x> <y>
  naval_fate mine (set | remove) <x> <y> [--moored | --drifting]
  naval_fate -h | --help
  naval_fate --version

Options:
  -h, --help     Show this screen.
  --version      Show version.
  --speed=<kn>   Speed in knots [default: 10].
  --moored       Moored (anchored) mine.
  --drifting     Drifting mine.
";

fn main() {
    env_logger::init();

    let argv: Vec<String> = std::env::args().skip(1).collect();

    match parse(DOC, &argv, true, Some("naval_fate 2.0")) {
        Ok(Request::Help(text)) => {
            println!("{text}");
        }
        Ok(Request::Version(text)) => {
            println!("{text}");
        }
        Ok(Request::Matched(values)) => {
            eprintln!("{values:#?}");
            if values.as_bool("new") {
                println!("New ship {:?}", values.as_list("<name>"));
            } else if values.as_bool("move") {
                println!(
                    "Moving to ({:?}, {:?}) at {:?} knots",
                    values.as_str("<x>"),
                    values.as_str("<y>"),
                    values.as_str("--speed"),
                );
            } else if values.as_bool("shoot") {
                println!("Shooting at ({:?}, {:?})", values.as_str("<x>"), values.as_str("<y>"));
            } else if values.as_bool("set") || values.as_bool("remove") {
                println!("Mine at ({:?}, {:?})", values.as_str("<x>"), values.as_str("<y>"));
            }
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
