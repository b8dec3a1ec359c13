use bunting::prelude::*;
use bunting::{Flag, FlagSet};
use std::net::SocketAddr;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Format {
    Json,
    Text,
}

struct FormatParser;

impl Parser<Format> for FormatParser {
    fn parse_command_line(&self, raw: &str) -> Result<Format, BoxError> {
        match raw {
            "json" => Ok(Format::Json),
            "text" => Ok(Format::Text),
            _ => Err(format!("expected 'json' or 'text', got '{raw}'").into()),
        }
    }

    fn parse_environment(&self, raw: &str) -> Result<Format, BoxError> {
        self.parse_command_line(&raw.to_ascii_lowercase())
    }
}

fn main() {
    let mut flags = FlagSet::builder()
        .add(
            Flag::<Format>::custom("format")
                .parser(FormatParser)
                .default_value(Format::Text),
        )
        .add(
            Flag::<SocketAddr>::custom("peer")
                .parser(|raw: &str| raw.parse::<SocketAddr>().map_err(BoxError::from)),
        )
        .build();

    flags.parse();

    let format: Format = flags.get_or_exit("format");
    match flags.get_opt::<SocketAddr>("peer") {
        Ok(Some(peer)) => println!("Reporting to {peer} as {format:?}."),
        _ => println!("Reporting locally as {format:?}."),
    }
}
