use argot::Command;

// Flags are named on the command line (`-f value1`, `--long value2`).
// Arguments are positional (`value3 value4 value5`).
//
// $ arguments_vs_flags -f value1 --long value2 value3 value4 value5
fn main() {
    let mut command = Command::from_env();
    command
        .flag("f")
        .expect("Invalid argument parser configuration")
        .flag("l")
        .expect("Invalid argument parser configuration")
        .aka("long")
        .expect("Invalid argument parser configuration")
        .next_argument()
        .expect("Invalid argument parser configuration")
        .next_argument()
        .expect("Invalid argument parser configuration")
        .next_argument()
        .expect("Invalid argument parser configuration");

    println!("arguments: {:?}", command.argument_values());
    println!("flags: {:?}", command.flag_values());
}
