use clapp::{Argument, CommandNode};

fn main() {
    let mut app = CommandNode::new("my_app")
        .version("1.0")
        .about("Testing a command line app.")
        .main(|context| {
            println!("starting my_app...");

            for (key, value) in context.iter() {
                println!("{key}: {value}");
            }

            println!("Done!");
            0
        });

    app.add_arguments([
        Argument::new("out_file")
            .short("-o")
            .long("--output")
            .takes(1)
            .help("The output file.")
            // Actions run after validation, but before main.
            .action(|context| {
                println!("-o was passed the file: {}", context.text("out_file").unwrap_or_default());
                Ok(())
            }),
        Argument::new("in_file")
            .index(1)
            .required(true)
            .help("The input file."),
    ])
    .expect("Invalid command configuration");

    std::process::exit(app.start().exit_code());
}
