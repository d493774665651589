use argot::SubCommand;

// $ sub_command add -v name
// $ sub_command remove --force name
fn main() {
    let mut add = SubCommand::from_env("add");
    add.command_mut()
        .help("Add a name.")
        .option("v")
        .expect("Invalid argument parser configuration")
        .aka("verbose")
        .expect("Invalid argument parser configuration")
        .increment(3)
        .argument(0)
        .expect("Invalid argument parser configuration")
        .required(true)
        .title("name");

    let mut remove = SubCommand::from_env("remove");
    remove
        .command_mut()
        .help("Remove a name.")
        .option("force")
        .expect("Invalid argument parser configuration")
        .boolean()
        .argument(0)
        .expect("Invalid argument parser configuration")
        .required(true)
        .title("name");

    if let Some(resolution) = add.parse().expect("errors are trapped") {
        println!(
            "Adding '{}' (verbosity {}).",
            resolution.argument(0).map(ToString::to_string).unwrap_or_default(),
            resolution.get("verbose").map(ToString::to_string).unwrap_or_default()
        );
    } else if let Some(resolution) = remove.parse().expect("errors are trapped") {
        println!(
            "Removing '{}' (force: {}).",
            resolution.argument(0).map(ToString::to_string).unwrap_or_default(),
            resolution.get("force").map(ToString::to_string).unwrap_or_default()
        );
    } else {
        println!("Usage: sub_command (add|remove) ...");
    }
}
