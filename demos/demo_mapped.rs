use argbind::{prelude::*, AbstractParameter, CommandLine, Converter, Mapping, Value};

fn main() {
    let speed = Mapping::default()
        .entry(&["fast", "f"], Value::Int(3), "Hurry up.")
        .entry(&["normal", "n"], Value::Int(2), "Take it easy.")
        .entry(&["slow", "s"], Value::Int(1), "Enjoy the view.");
    let colour = Mapping::default()
        .case_sensitive()
        .choice("red", "The colour red.")
        .choice("blue", "The colour blue.");

    let parser = CommandLine::new("drive")
        .about("Drive somewhere.  Use 'list' as the value of a choice to see its accepted values.")
        .add(
            AbstractParameter::positional("colour")
                .converter(Converter::mapped(colour))
                .help("The car to take."),
        )
        .add(
            AbstractParameter::named("speed")
                .converter(Converter::mapped(speed))
                .default(2)
                .help("How fast to go."),
        )
        .build();

    let invocation = parser.parse();
    let colour = invocation.root.args.first().map(Value::to_string).unwrap_or_default();
    let speed = invocation
        .root
        .kwargs
        .get("speed")
        .and_then(Value::as_int)
        .unwrap_or(2);
    println!("Driving the {colour} car at speed {speed}.");
}
