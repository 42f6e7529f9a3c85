use argbind::{AbstractParameter, Bound, CommandLine, Converter, Value};

fn main() {
    let parser = CommandLine::new("summer")
        .about("Sum the items.")
        .version("0.1.0")
        .add(
            AbstractParameter::positional("items")
                .converter(Converter::integer())
                .multi(Bound::Lower(1))
                .help("The items to sum."),
        )
        .add(
            AbstractParameter::named("verbose")
                .alias("v")
                .default(false)
                .help("Show each item."),
        )
        .build();

    let invocation = parser.parse();
    let items: Vec<i64> = invocation
        .root
        .args
        .first()
        .and_then(Value::as_list)
        .unwrap_or_default()
        .iter()
        .filter_map(Value::as_int)
        .collect();

    if invocation.root.kwargs.get("verbose") == Some(&Value::Bool(true)) {
        for item in &items {
            println!("+ {item}");
        }
    }

    let sum: i64 = items.iter().sum();
    println!("Sum: {sum}");
}
