use bunting::{Counter, Flag, FlagSet};

fn main() {
    let mut flags = FlagSet::builder()
        .add(
            Flag::<Counter>::new("verbose")
                .shorthand('v')
                .description("Talk more; repeat for more detail."),
        )
        .add(Flag::<bool>::new("quiet").shorthand('q'))
        .build();

    flags.parse();

    let verbosity = flags.count("verbose").unwrap_or_default();
    let quiet = flags.get_opt::<bool>("quiet").ok().flatten().unwrap_or_default();

    match (quiet, verbosity) {
        (true, _) => {}
        (false, 0) => println!("Done."),
        (false, 1) => println!("Done, verbosely."),
        (false, n) => println!("Done, at verbosity {n}."),
    }
}
