use argbind::{AbstractParameter, Action, CommandLine, Converter, Value};

fn main() {
    let parser = CommandLine::new("tasks")
        .about("Track a list of tasks.")
        .add(
            AbstractParameter::named("verbose")
                .alias("v")
                .default(false)
                .help("Explain what is happening."),
        )
        .branch("command")
        .command("add", |sub| {
            sub.about("Add a task.")
                .add(AbstractParameter::positional("title").help("What to do."))
                .add(
                    AbstractParameter::named("priority")
                        .alias("p")
                        .converter(Converter::integer())
                        .default(1)
                        .help("Lower is sooner."),
                )
        })
        .command("done", |sub| {
            sub.about("Complete tasks.").add(
                AbstractParameter::var_positional("ids")
                    .converter(Converter::integer())
                    .help("The tasks to complete."),
            )
        })
        .command("list", |sub| {
            sub.about("List the tasks.").alternate(
                &["count"],
                Action::Named("count".to_string()),
                "Only count the tasks.",
            )
        })
        .build();

    let invocation = parser.parse();

    if invocation.root.kwargs.get("verbose") == Some(&Value::Bool(true)) {
        println!("Running sub-command {:?}.", invocation.command);
    }

    let binding = invocation.binding();

    match (invocation.command.as_deref(), &binding.func) {
        (Some("add"), _) => {
            let title = binding.args.first().map(Value::to_string).unwrap_or_default();
            let priority = binding.kwargs.get("priority").and_then(Value::as_int).unwrap_or(1);
            println!("Added '{title}' (priority {priority}).");
        }
        (Some("done"), _) => {
            for id in binding.args.iter().filter_map(Value::as_int) {
                println!("Completed #{id}.");
            }
        }
        (Some("list"), Some(Action::Named(action))) => {
            println!("Listing via '{action}': 0 tasks.");
        }
        (Some("list"), _) => {
            println!("No tasks.");
        }
        _ => {
            panic!("impossible - the parser rejects sub-commands which were not set up.")
        }
    }
}
