//! `argot` is a declarative command line option parser for Rust.
//!
//! Declare the options of a program, let `argot` consume the command line, and read the values back.
//! `argot` is concerned with the following:
//! * *Named options and positional arguments*:
//! Options are specified via `-x` or `--name` syntax, arguments by their position.
//! Undeclared arguments are still collected.
//! * *Aliases*:
//! An option answers to its name and to each of its aliases, interchangeably.
//! * *Validation and transformation*:
//! Each value may be validated by a rule, transformed by a map, or folded across repeated occurrences by a reducer.
//! * *Relations*:
//! Options may be required (always or conditionally), need other options, or conflict with them.
//! * *Sub-commands*:
//! Multiple related programs may share one command line by dispatching on the first argument.
//!
//! # Usage
//! More examples are outlined in [the source](https://github.com/argot-rs/argot/tree/main/demos).
//! ```no_run
#![doc = include_str!("../demos/greet.rs")]
//! ```
//!
//! ```console
//! $ greet nate
//! Hello nate!
//!
//! $ greet -c -t Mister 'nate good'
//! Hello Mr. Nate Good!
//!
//! $ greet -t Sir nate
//! ERROR: Invalid value 'Sir' for option 't'.
//! ```
//!
//! # Token grammar
//! * `-x` is the short option `x`; `-abc` is equivalent to `-a -b -c`.
//! * `--name` is the long option `name`.
//! * `--name=value` (or `-x=value`) is equivalent to `--name value`.
//! The value after `=` is always taken literally, so `--offset=-5` works.
//! * Any token without a leading `-` is positional.
//! * Any other token with a leading `-` is a syntax error.
//!
//! # Option kinds
//! * Plain options consume the following token as their value (see [`Command::option`]).
//! * [`OptionBuilder::boolean`] options consume nothing; their presence negates the default.
//! * [`OptionBuilder::increment`] options consume nothing; they count their occurrences (ex: `-vvv`).
//! * [`OptionBuilder::file`] options treat their value as a path, optionally expanding glob patterns.
//!
//! # Resolution
//! For each occurrence of an option, its value is resolved in the following order:
//! 1. The rule ([`OptionBuilder::must`]) validates the raw value.
//! 2. File options check existence or expand the glob pattern.
//! 3. The reducer ([`OptionBuilder::reduce`]) folds the value into the accumulator.
//! 4. The map ([`OptionBuilder::map`]) transforms the result.
//!
//! Once every token is consumed, requirements are checked, then needs and conflicts.
//! The parse is all-or-nothing: any failure leaves no values exposed.
//!
//! # Errors
//! By default, `argot` traps parse errors: it prints `ERROR: <message>`, beeps and exits with status `1`.
//! Likewise, `-help`/`--help` prints the help page and exits with status `0`.
//! See [`Command::do_not_trap_errors`] and [`Command::use_default_help`] to change this.
//!
//! Invalid declarations (ex: a malformed option name) are always returned as a [`DeclarationError`].
//!
//! # Features
//! * `tracing_debug`: emit `tracing` debug events while parsing.
pub use argot_builder::*;
