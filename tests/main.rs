use argbind::{
    prelude::*, AbstractParameter, Action, ArgumentDecorator, BindError, Bound, CliSignature,
    CommandLine, ConfigError, Converter, Flag, Inserter, Mapping, Value,
};
use assert_matches::assert_matches;
use rstest::rstest;

fn signature(parameters: Vec<AbstractParameter>) -> CliSignature {
    CliSignature::from_abstract(parameters, Vec::default()).unwrap()
}

fn strs(values: &[&str]) -> Vec<Value> {
    values.iter().map(|v| Value::from(*v)).collect()
}

#[test]
fn builder_compiles() {
    CommandLine::new("organization").build_parser().unwrap();
}

#[test]
fn grammar() {
    // Setup
    let signature = signature(vec![
        AbstractParameter::positional("source"),
        AbstractParameter::positional("target").default("."),
        AbstractParameter::var_positional("rest"),
        AbstractParameter::named("verbose").default(false),
        AbstractParameter::named("level").converter(Converter::integer()),
    ]);

    // Execute & verify
    assert_eq!(
        signature.to_string(),
        "source [--target=STR] [rest...] [--verbose] --level=INT"
    );
}

#[rstest]
#[case(vec!["--level", "3", "a"], vec!["a"], 3, false)]
#[case(vec!["a", "b", "--level=4", "--verbose"], vec!["a", "b"], 4, true)]
#[case(vec!["-l5", "a", "--", "--verbose"], vec!["a", "--verbose"], 5, false)]
#[case(vec!["-vl6", "a"], vec!["a"], 6, true)]
fn bind(
    #[case] tokens: Vec<&str>,
    #[case] args: Vec<&str>,
    #[case] level: i64,
    #[case] verbose: bool,
) {
    // Setup
    let signature = signature(vec![
        AbstractParameter::positional("source"),
        AbstractParameter::var_positional("rest"),
        AbstractParameter::named("verbose").alias("v").default(false),
        AbstractParameter::named("level")
            .alias("l")
            .converter(Converter::integer()),
    ]);

    // Execute
    let binding = signature.bind(&tokens, "program").unwrap();

    // Verify
    assert_eq!(binding.func, None);
    assert_eq!(binding.args, strs(&args));
    assert_eq!(binding.kwargs.get("level"), Some(&Value::Int(level)));
    assert_eq!(binding.kwargs.get("verbose"), Some(&Value::Bool(verbose)));
}

#[test]
fn bind_errors() {
    // Setup
    let signature = signature(vec![
        AbstractParameter::positional("count").converter(Converter::integer()),
        AbstractParameter::named("verbose").default(false),
    ]);

    // Execute & verify
    assert_matches!(
        signature.bind(&[], "program").unwrap_err().error(),
        BindError::MissingRequiredArguments { names } if names == &vec!["count".to_string()]
    );
    assert_matches!(
        signature.bind(&["1", "2"], "program").unwrap_err().error(),
        BindError::TooManyArguments { .. }
    );
    assert_matches!(
        signature.bind(&["x"], "program").unwrap_err().error(),
        BindError::BadArgumentFormat { value, .. } if value == "x"
    );
    assert_matches!(
        signature.bind(&["1", "--verbos"], "program").unwrap_err().error(),
        BindError::UnknownOption { suggestion: Some(s), .. } if s == "--verbose"
    );
    assert_matches!(
        signature.bind(&["1", "--verbose", "--verbose"], "program").unwrap_err().error(),
        BindError::DuplicateNamedArgument { .. }
    );
}

#[test]
fn multi_valued() {
    // Setup
    let signature = signature(vec![AbstractParameter::positional("pair")
        .converter(Converter::float())
        .multi(Bound::Range(2, 2))]);

    // Execute
    let binding = signature.bind(&["0.5", "1.5"], "program").unwrap();
    let error = signature.bind(&["0.5"], "program").unwrap_err();

    // Verify
    assert_eq!(
        binding.args,
        vec![Value::List(vec![Value::Float(0.5), Value::Float(1.5)])]
    );
    assert_matches!(
        error.error(),
        BindError::NotEnoughValues {
            provided: 1,
            expected: 2,
            ..
        }
    );
}

#[test]
fn mapped() {
    // Setup
    let mapping = Mapping::default()
        .entry(&["fast", "f"], 3, "Hurry up.")
        .choice("slow", "Enjoy the view.");
    let signature = signature(vec![AbstractParameter::named("speed")
        .converter(Converter::mapped(mapping))
        .default("slow")]);

    // Execute & verify
    let binding = signature.bind(&["--speed", "F"], "program").unwrap();
    assert_eq!(binding.kwargs.get("speed"), Some(&Value::Int(3)));

    let binding = signature.bind(&[], "program").unwrap();
    assert_eq!(binding.kwargs.get("speed"), Some(&Value::from("slow")));

    let binding = signature.bind(&["--speed=list"], "program").unwrap();
    assert_eq!(
        binding.func,
        Some(Action::ListValues {
            parameter: "--speed".to_string()
        })
    );
}

#[test]
fn decorated_and_inserted() {
    // Setup
    let upper = ArgumentDecorator::new(|value, kwargs| match kwargs.get("upper") {
        Some(Value::Bool(true)) => Ok(Value::Str(value.to_string().to_uppercase())),
        _ => Ok(value),
    })
    .add(AbstractParameter::named("upper").alias("u").default(false));
    let signature = signature(vec![
        AbstractParameter::positional("word").decorated(upper),
        AbstractParameter::positional("program").inserter(Inserter::invocation_name()),
    ]);

    // Execute
    let binding = signature.bind(&["-u", "hello"], "echo").unwrap();

    // Verify
    assert_eq!(binding.args, strs(&["HELLO", "echo"]));
    assert_eq!(binding.kwargs.get("upper"), None);
}

#[rstest]
#[case(vec![AbstractParameter::positional("a"), AbstractParameter::named("a")], ConfigError::DuplicateParameter("a".to_string()))]
#[case(vec![AbstractParameter::named("abc").alias("a"), AbstractParameter::named("apple").alias("a")], ConfigError::DuplicateAlias("-a".to_string()))]
#[case(vec![AbstractParameter::var_positional("rest"), AbstractParameter::positional("b").flag(Flag::Required)], ConfigError::CatchAllNotLast("rest".to_string()))]
fn config_errors(#[case] parameters: Vec<AbstractParameter>, #[case] expected: ConfigError) {
    // Execute
    let error = CliSignature::from_abstract(parameters, Vec::default()).unwrap_err();

    // Verify
    assert_eq!(error, expected);
}

#[test]
fn parse_tokens() {
    // Setup
    let parser = CommandLine::new("summer")
        .version("0.1.0")
        .add(
            AbstractParameter::positional("items")
                .converter(Converter::integer())
                .multi(Bound::Lower(1)),
        )
        .build_parser()
        .unwrap();

    // Execute
    let invocation = parser.parse_tokens(&["1", "2", "3"]).unwrap();

    // Verify
    assert_eq!(invocation.command, None);
    assert_eq!(invocation.sub_command, None);
    assert_eq!(
        invocation.root.args,
        vec![Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])]
    );
}

#[rstest]
#[case(vec!["--help"], 0)]
#[case(vec!["--version"], 0)]
#[case(vec![], 1)]
#[case(vec!["1", "x"], 1)]
fn parse_tokens_exit(#[case] tokens: Vec<&str>, #[case] exit_code: i32) {
    // Setup
    let parser = CommandLine::new("summer")
        .version("0.1.0")
        .add(
            AbstractParameter::positional("items")
                .converter(Converter::integer())
                .multi(Bound::Lower(1)),
        )
        .build_parser()
        .unwrap();

    // Execute
    let result = parser.parse_tokens(&tokens);

    // Verify
    assert_matches!(result, Err(code) if code == exit_code);
}

#[test]
fn sub_commands() {
    // Setup
    let parser = CommandLine::new("tasks")
        .add(AbstractParameter::named("verbose").alias("v").default(false))
        .branch("command")
        .command("add", |sub| {
            sub.add(AbstractParameter::positional("title")).add(
                AbstractParameter::named("priority")
                    .converter(Converter::integer())
                    .default(1),
            )
        })
        .command("done", |sub| {
            sub.add(AbstractParameter::var_positional("ids").converter(Converter::integer()))
        })
        .build_parser()
        .unwrap();

    // Execute
    let invocation = parser
        .parse_tokens(&["-v", "add", "--priority", "2", "write tests"])
        .unwrap();

    // Verify
    assert_eq!(invocation.command, Some("add".to_string()));
    assert_eq!(invocation.root.kwargs.get("verbose"), Some(&Value::Bool(true)));
    let binding = invocation.binding();
    assert_eq!(binding.args, strs(&["write tests"]));
    assert_eq!(binding.kwargs.get("priority"), Some(&Value::Int(2)));
}

#[test]
fn sub_command_unknown() {
    // Setup
    let parser = CommandLine::new("tasks")
        .branch("command")
        .command("done", |sub| sub)
        .build_parser()
        .unwrap();

    // Execute
    let result = parser.parse_tokens(&["don"]);

    // Verify
    assert_matches!(result, Err(1));
}

#[test]
fn sub_command_duplicate() {
    // Execute
    let result = CommandLine::new("tasks")
        .branch("command")
        .command("done", |sub| sub)
        .command("done", |sub| sub)
        .build_parser();

    // Verify
    assert_matches!(result.err(), Some(ConfigError::DuplicateCommand(name)) if name == "done");
}
