use argot::{Command, Value};

fn main() {
    let mut command = Command::from_env();
    command
        .next_argument()
        .expect("Invalid argument parser configuration")
        .required(true)
        .title("name")
        .describe("A person's name.")
        .option("t")
        .expect("Invalid argument parser configuration")
        .aka("title")
        .expect("Invalid argument parser configuration")
        .describe("When set, use this title to address the person.")
        .must(|title| {
            matches!(
                title.as_str(),
                Some("Mister" | "Mr" | "Misses" | "Mrs" | "Miss" | "Ms")
            )
        })
        .map(|title| {
            let short = match title.as_str() {
                Some("Mister") => "Mr",
                Some("Misses") => "Mrs",
                Some("Miss") => "Ms",
                Some(other) => other,
                None => "",
            };
            Value::Str(format!("{short}. "))
        })
        .option("c")
        .expect("Invalid argument parser configuration")
        .aka("capitalize")
        .expect("Invalid argument parser configuration")
        .aka("cap")
        .expect("Invalid argument parser configuration")
        .describe("Always capitalize the words in a name.")
        .boolean();

    let name = command
        .get(0usize)
        .map(ToString::to_string)
        .unwrap_or_default();
    let name = if command.get("capitalize") == Some(&Value::Bool(true)) {
        capitalize(&name)
    } else {
        name
    };
    let title = command
        .get("title")
        .map(ToString::to_string)
        .unwrap_or_default();

    println!("Hello {title}{name}!");
}

fn capitalize(words: &str) -> String {
    words
        .split(' ')
        .map(|word| {
            let mut characters = word.chars();
            match characters.next() {
                Some(first) => first.to_uppercase().chain(characters).collect(),
                None => String::default(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
