//! `bunting` is a typed command line flag parser for Rust, with an environment variable overlay.
//!
//! Many programs take the same settings from two places: flags on the command line, and variables in the environment (ex: in a container).
//! `bunting` treats these as two sources for one set of typed flags.
//! Specifically, `bunting` attempts to prioritize the following design concerns:
//! * *Type safe flags*:
//! The user should not call any `&str -> T` conversion functions directly.
//! Each flag declares its type once, and the value is read back as that type.
//! * *One flag, two sources*:
//! A flag is bound from `--name value` on the command line, and from a derived variable (ex: `APP_NAME`) in the environment.
//! The flag remembers which of the sources assigned it.
//! * *Forgiving command line*:
//! Tokens which are not flags are skipped, so `bunting` may share a command line with other parsers.
//! * *Detailed yet basic UX*:
//! Errors point at the offending token, and the usage output lists every flag with its default and environment variable.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/demo_server.rs")]
//! ```
//!
//! ```console
//! $ SERVER_DEBUG=true server --port 8080 --allow a.com,b.com --allow c.com
//! Listening on 127.0.0.1:8080 (read timeout: 30s, debug: true).
//! Allowing a.com.
//! Allowing b.com.
//! Allowing c.com.
//!
//! $ server
//! Missing required flags: port.
//! usage: server [--allow ALLOW[,...]] [-d] [--host HOST] [-p PORT] [--read-timeout READ_TIMEOUT]
//!
//! options:
//!  --allow ALLOW[,...]           The origins to accept.                     SERVER_ALLOW
//!  -d, --debug                                                              SERVER_DEBUG
//!  --host HOST                   The address to bind. (default:             SERVER_HOST
//!                                127.0.0.1)
//!  -p PORT, --port PORT          The port to bind. (required)               SERVER_PORT
//!  --read-timeout READ_TIMEOUT   How long to wait on a slow client.         SERVER_READ_TIMEOUT
//!                                (default: 30s)
//!
//! $ server --prot 80
//! Parse error: Unknown flag '--prot'.
//! --prot 80
//! ^
//! ```
//!
//! # Flags
//! Configure `bunting` by starting with a [`FlagSet::builder`] and `add`ing flags.
//! Each [`Flag`] is typed by the value it holds, which also fixes its [`Kind`]:
//! * Scalars: `String`, `bool`, the integer types, `f32`, `f64` and [`std::time::Duration`] (ex: `1h30m`).
//! * Slices: `Vec<T>` of any scalar `T`.
//! The value is split on the flag's separator (`,` unless configured).
//! Repeated occurrences on the command line append.
//! * [`Counter`]: counts its occurrences (ex: `-vvv`).
//! * Custom: any type, converted by a [Parser](./prelude/trait.Parser.html) supplied with [`Flag::parser`].
//!
//! Flags may additionally carry a shorthand, a description, a default value, and be marked as `required`.
//! Registration rejects duplicate names and shorthands, both compared without regard to ASCII case.
//!
//! ```no_run
#![doc = include_str!("../demos/demo_custom.rs")]
//! ```
//!
//! # Command Line Semantics
//! Tokens are matched left to right:
//! * `--name` matches a flag by name, ignoring ASCII case.
//! * `-abc` matches each of the shorthands `a`, `b` and `c`; only the last one receives values.
//! * The tokens following a flag, up to the next token starting with `-`, are its value.
//! Multiple value tokens are joined with the flag's separator.
//! * Booleans and counters need no value, while other scalars and slices fail with an empty one.
//! * A flag may only occur once, unless it is a slice or a counter.
//!
//! ```no_run
#![doc = include_str!("../demos/demo_verbosity.rs")]
//! ```
//!
//! # Environment Semantics
//! [`FlagSet::bind_env`] looks up every flag under a variable named by the configured [`EnvNaming`]:
//! the prefix is joined on with `_`, then the replacement applies, then the name is uppercased.
//! Unset and empty variables are skipped.
//! A value from the environment replaces any value from the command line, including slices.
//! Unlike the command line, one failure does not stop the remaining flags from binding; all failures are reported together in an [`EnvError`].
//!
//! # Features
//! * `tracing_debug`: emit debug logs of the parser's internals via the [`tracing`](https://docs.rs/tracing) crate.
pub use bunting_builder::*;
