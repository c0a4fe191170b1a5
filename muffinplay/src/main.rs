use muffin::{Book, Config, Next, Terminal};
use std::{env, process::ExitCode, time::Duration};

const WARM_UP_VAR: &str = "MUFFIN_WARM_UP";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
    let book = match sample_book() {
        Ok(book) => book.with_config(config()),
        Err(err) => {
            log::error!("when writing the sample book: {err}");
            return ExitCode::FAILURE;
        }
    };
    for issue in book.check() {
        log::warn!("{issue}");
    }
    if let Err(err) = book.tell(&mut Terminal, &mut Terminal) {
        log::error!("when telling `{}`: {err}", book.title());
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn config() -> Config {
    let config = Config::default();
    let Ok(value) = env::var(WARM_UP_VAR) else {
        return config;
    };
    match value.trim().parse::<f64>().map(Duration::try_from_secs_f64) {
        Ok(Ok(warm_up)) => config.with_warm_up(warm_up),
        _ => {
            log::warn!("ignoring {WARM_UP_VAR}={value:?}: expected a non-negative number of seconds");
            config
        }
    }
}

fn sample_book() -> muffin::Result<Book> {
    let mut book = Book::new("Test Book", "Jon Doe");
    book.add_narrative(
        "start",
        "@Blinking Text@ _Underlined Text_ *Bold Text* %Decision Text% `%Escaped Text`% \
         ``Escaped Escaped Text`` |Sleeping for 3 seconds... |<3>| The next decision point \
         will ask you to make a _*decision*_ or a _*choice*_.",
        "dorc",
    )?;
    book.add_decision(
        "dorc",
        "Are you going to make a %DECISION% or a %CHOICE%?",
        [("DECISION", "story_d"), ("CHOICE", "story_c")],
    )?;
    book.add_narrative(
        "story_d",
        "This is the end of the test. You chose to make a %Decision%",
        Next::End,
    )?;
    book.add_narrative(
        "story_c",
        "This is the end of the test. You decided to make a %Choice%",
        Next::End,
    )?;
    book.set_start("start");
    Ok(book)
}

#[cfg(test)]
mod tests {
    use muffin::{Next, ScriptedInput, Transcript};
    use std::time::Duration;

    #[test]
    fn sample_book() {
        let book = super::sample_book().unwrap();
        assert!(book.check().is_empty(), "{:?}", book.check());
        let mut out = Transcript::new();
        let next = book
            .run_single_point("dorc", &mut out, &mut ScriptedInput::new(["c"]))
            .unwrap();
        assert_eq!(next, Next::point("story_c"));
        let mut out = Transcript::new();
        book.tell(&mut out, &mut ScriptedInput::new(["dec"])).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(
            lines[2],
            "Blinking Text Underlined Text Bold Text DECISION TEXT %Escaped Text% \
             `Escaped Escaped Text` "
        );
        assert_eq!(
            lines[lines.len() - 2],
            "This is the end of the test. You chose to make a DECISION"
        );
        assert_eq!(out.pauses(), [Duration::from_secs(3), Duration::from_secs(3)]);
    }
}
