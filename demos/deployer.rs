use clapp::{ActionError, Argument, CommandNode, Outcome};

fn main() {
    let mut deploy = CommandNode::new("deploy")
        .about("Deploy the build to an environment.")
        .main(|context| {
            let target = context.text("target").unwrap_or_default();
            let replicas = context.text("replicas").unwrap_or("1");
            println!("Deploying {replicas} replica(s) to '{target}'.");

            if context.is_set("dry_run") {
                println!("(dry run - nothing changed)");
            }

            0
        });
    deploy
        .add_arguments([
            Argument::new("target")
                .short("-t")
                .long("--target")
                .takes(1)
                .required(true)
                .help("The environment to deploy to.")
                .action(|context| match context.text("target") {
                    Some("prod") | Some("staging") | Some("dev") => Ok(()),
                    Some(other) => Err(ActionError::new(format!("unknown target '{other}'."))),
                    None => Ok(()),
                }),
            Argument::new("replicas")
                .long("--replicas")
                .takes(1)
                .default("1")
                .help("The number of instances to run."),
            Argument::new("dry_run")
                .short("-n")
                .long("--dry-run")
                .help("Show what would happen, without doing it."),
        ])
        .expect("Invalid command configuration");

    let mut status = CommandNode::new("status")
        .about("Show the deployed versions.")
        .main(|context| {
            match context.text("environment") {
                Some(environment) => println!("Status of '{environment}': ok"),
                None => println!("Status of all environments: ok"),
            };
            0
        });
    status
        .add_argument(
            Argument::new("environment")
                .index(1)
                .help("Limit the status to this environment."),
        )
        .expect("Invalid command configuration");

    let mut app = CommandNode::new("deployer")
        .version("0.5.0")
        .author("The deployer authors")
        .about("Ship builds to environments.");
    app.add_argument(
        Argument::new("verbose")
            .short("-V")
            .long("--verbose")
            .help("Print every step."),
    )
    .expect("Invalid command configuration");
    app.add_sub_command(deploy)
        .expect("Invalid command configuration");
    app.add_sub_command(status)
        .expect("Invalid command configuration");

    match app.start() {
        Outcome::Context(context) => {
            // No sub-command was given.
            if context.is_set("verbose") {
                println!("{context:?}");
            }

            println!("Try 'deployer --help'.");
        }
        outcome => std::process::exit(outcome.exit_code()),
    }
}
