use bunting::{EnvNaming, Flag, FlagSet};
use std::time::Duration;

fn main() {
    let mut flags = FlagSet::builder()
        .env(EnvNaming::new().prefix("server").replace("-", "_").uppercase())
        .add(
            Flag::<String>::new("host")
                .description("The address to bind.")
                .default_value("127.0.0.1".to_string()),
        )
        .add(
            Flag::<u16>::new("port")
                .shorthand('p')
                .description("The port to bind.")
                .required(),
        )
        .add(
            Flag::<Duration>::new("read-timeout")
                .description("How long to wait on a slow client.")
                .default_value(Duration::from_secs(30)),
        )
        .add(Flag::<Vec<String>>::new("allow").description("The origins to accept."))
        .add(Flag::<bool>::new("debug").shorthand('d'))
        .build();

    flags.parse();

    if let Err(error) = flags.bind_env() {
        eprintln!("{error}");
        std::process::exit(1);
    }

    let missing = flags.missing_required();
    if !missing.is_empty() {
        eprintln!("Missing required flags: {}.", missing.join(", "));
        flags.print_usage("server");
        std::process::exit(1);
    }

    let host: String = flags.get_or_exit("host");
    let port: u16 = flags.get_or_exit("port");
    let read_timeout: Duration = flags.get_or_exit("read-timeout");
    let allow: Vec<String> = flags.get_opt("allow").ok().flatten().unwrap_or_default();
    let debug: bool = flags.get_opt("debug").ok().flatten().unwrap_or_default();

    println!("Listening on {host}:{port} (read timeout: {read_timeout:?}, debug: {debug}).");
    for origin in allow {
        println!("Allowing {origin}.");
    }
}
