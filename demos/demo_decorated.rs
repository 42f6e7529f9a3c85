use argbind::{AbstractParameter, ArgumentDecorator, CommandLine, Converter, Inserter, Value};

fn main() {
    let shout = ArgumentDecorator::new(|value, kwargs| {
        let mut text = value.to_string();

        if kwargs.get("upper") == Some(&Value::Bool(true)) {
            text = text.to_uppercase();
        }

        match kwargs.get("repeat").and_then(Value::as_int) {
            Some(n) if n < 1 => Err(format!("cannot repeat {n} times.")),
            Some(n) => Ok(Value::Str(vec![text; n as usize].join(" "))),
            None => Ok(Value::Str(text)),
        }
    })
    .add(
        AbstractParameter::named("upper")
            .alias("u")
            .default(false)
            .help("Shout the word."),
    )
    .add(
        AbstractParameter::named("repeat")
            .alias("r")
            .converter(Converter::integer())
            .default(1)
            .help("How many times to say the word."),
    );

    let parser = CommandLine::new("echo")
        .add(
            AbstractParameter::positional("word")
                .decorated(shout)
                .help("The word to say."),
        )
        .add(AbstractParameter::positional("program").inserter(Inserter::invocation_name()))
        .build();

    let invocation = parser.parse();

    match invocation.root.args.as_slice() {
        [word, program] => println!("{program} says: {word}"),
        _ => unreachable!("internal error - both positional arguments are bound"),
    }
}
