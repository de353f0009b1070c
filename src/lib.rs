//! `clapp` is a declarative command line application builder for Rust.
//!
//! Declare the arguments of your program, attach actions to them, nest sub-commands, and hand over a main entry point.
//! `clapp` takes care of the rest: tokenizing, validating the command line against the declared grammar, resolving every argument to a value, and displaying help, version and error messages.
//!
//! `clapp` deliberately keeps values as text.
//! Arguments resolve to a [`Value`]: a single token, a list of tokens, or a boolean (for presence, or absence).
//! Converting those values is left to the program.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/my_app.rs")]
//! ```
//!
//! ```console
//! $ my_app -h
//! my_app v1.0
//! Testing a command line app.
//!
//! usage: my_app [-hv] [-o OUT_FILE] IN_FILE
//!
//! flags:
//!  -h, --help              Display help information.
//!  -v, --version           Display version information.
//!
//! options:
//!  -o, --output OUT_FILE   The output file.
//!
//! required arguments:
//!  IN_FILE                 The input file.
//!
//! $ my_app --output=out.txt in.txt
//! -o was passed the file: out.txt
//! starting my_app...
//! help: false
//! in_file: in.txt
//! out_file: out.txt
//! version: false
//! Done!
//!
//! $ my_app -o
//! Parse error: '-o' expected 1 value(s) but received 0.
//! -o
//!   ^
//! usage: my_app [-hv] [-o OUT_FILE] IN_FILE
//! For more information try --help
//! ```
//!
//! # Arguments
//! Each [`Argument`] has a name (the key of its value in the [`Context`]), and falls into one [`Class`]:
//! * *Flags* take no values, ex: `-V` or `--verbose`.
//! They resolve to `true` when present, and `false` otherwise.
//! * *Options* take a fixed number of values (the arity, see [`Argument::takes`]), ex: `-o out.txt`.
//! An option of arity 1 resolves to its token, and larger arities to the list of tokens.
//! * *Required options* must appear on the command line.
//! * *Positional arguments* are identified by their 1-based [`Argument::index`], and take one token each.
//! Positional tokens are assigned in ascending index order.
//! * *Required positional arguments* must appear on the command line.
//!
//! Absent arguments resolve to their [`Argument::default`], or `false` when there is none (or it is empty).
//!
//! Short spellings may be combined (`-abc` is `-a -b -c`), and any spelling may be joined to its first value (`--output=out.txt`).
//! An argument may also be given by its bare name (`out_file out.txt`).
//! A value may not start with `-`.
//!
//! Every value is reachable by the argument name, its spellings (`-o`, `--output`), or its positional key (`index1`).
//! The key `raw_args` holds the tokens handed to the command.
//!
//! # Actions
//! An argument may carry an [`Argument::action`].
//! Once the command line is validated and the context resolved, the actions of the matched arguments run in the order they were matched.
//! The first [`ActionError`] halts the run; the main callback is not invoked.
//!
//! The `-h`/`--help` and `-v`/`--version` flags are added to every command (unless their long spellings are already taken).
//! Their actions display the message and stop the run, before any validation.
//! That way `--help` works even when required arguments are missing.
//!
//! # Sub-commands
//! A [`CommandNode`] may hold sub-commands.
//! When a token at the parent level names a sub-command, parsing stops at the parent, the parent's actions run, and the remaining tokens are handed to the sub-command.
//! The sub-command's outcome is the outcome of the run (the parent's main callback is not invoked).
//!
//! ```no_run
#![doc = include_str!("../demos/deployer.rs")]
//! ```
//!
//! ```console
//! $ deployer deploy --target prod -n
//! Deploying 1 replica(s) to 'prod'.
//! (dry run - nothing changed)
//!
//! $ deployer deploy --target moon
//! Action error: unknown target 'moon'.
//!
//! $ deployer deploy -h
//! deployer deploy
//! Deploy the build to an environment.
//!
//! usage: deployer deploy [-nhv] [--replicas REPLICAS] -t TARGET
//! <truncated>
//! ```
//!
//! # Features
//! * `tracing_debug`: emit `tracing` debug events during registration, tokenization, matching and dispatch.
pub use clapp_builder::*;
