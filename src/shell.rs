//! Interactive menu loop
//!
//! Reads choices line by line from any [`BufRead`] and writes prompts and
//! results to any [`Write`]. Operation failures are printed and the loop
//! carries on; only "Exit" or end of input stops it.

use crate::app::WeatherLogApp;
use crate::report::ReportOutcome;
use crate::store::LogStore;
use crate::weather::ForecastProvider;
use std::io::{self, BufRead, Write};
use tracing::debug;

const MAIN_MENU: &str = "\nMenu:\n\
1. Log weather data for today\n\
2. View reports\n\
3. View log history\n\
4. Exit\n\
Enter your choice: ";

const REPORT_MENU: &str = "\nView Reports:\n\
1. Day report\n\
2. Week report\n\
3. Month report\n\
Enter your choice: ";

/// Run the menu until the user exits or input ends
pub async fn run<S, P, R, W>(
    app: &WeatherLogApp<S, P>,
    mut input: R,
    mut output: W,
) -> io::Result<()>
where
    S: LogStore,
    P: ForecastProvider,
    R: BufRead,
    W: Write,
{
    writeln!(output, "Weather Log Application")?;

    loop {
        write!(output, "{MAIN_MENU}")?;
        output.flush()?;

        let Some(choice) = read_line(&mut input)? else {
            debug!("Input closed, leaving menu");
            writeln!(output)?;
            return Ok(());
        };

        match choice.as_str() {
            "1" => log_weather_data(app, &mut input, &mut output)?,
            "2" => view_reports(app, &mut input, &mut output).await?,
            "3" => view_log_history(app, &mut output)?,
            "4" => return Ok(()),
            _ => writeln!(output, "Invalid choice. Please try again.")?,
        }
    }
}

/// Next trimmed line, `None` at end of input
///
/// Bytes that are not UTF-8 are replaced, never rejected.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = Vec::new();
    if input.read_until(b'\n', &mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
}

fn log_weather_data<S, P, R, W>(
    app: &WeatherLogApp<S, P>,
    input: &mut R,
    output: &mut W,
) -> io::Result<()>
where
    S: LogStore,
    P: ForecastProvider,
    R: BufRead,
    W: Write,
{
    writeln!(output, "\nEnter weather measurements for today:")?;
    write!(output, "Temperature (°C): ")?;
    output.flush()?;

    let raw = read_line(input)?.unwrap_or_default();
    match app.log_temperature(&raw) {
        Ok(_) => writeln!(output, "Weather data logged successfully."),
        Err(e) => writeln!(output, "Error logging weather data: {}", e.user_message()),
    }
}

async fn view_reports<S, P, R, W>(
    app: &WeatherLogApp<S, P>,
    input: &mut R,
    output: &mut W,
) -> io::Result<()>
where
    S: LogStore,
    P: ForecastProvider,
    R: BufRead,
    W: Write,
{
    write!(output, "{REPORT_MENU}")?;
    output.flush()?;

    let choice = read_line(input)?.unwrap_or_default();
    let outcome = match choice.as_str() {
        "1" => {
            writeln!(output, "\nEnter date for the report (yyyy-MM-dd): ")?;
            output.flush()?;
            let raw_date = read_line(input)?.unwrap_or_default();
            match app.day_report(&raw_date).await {
                Ok(outcome) => outcome,
                Err(e) => return writeln!(output, "{}", e.user_message()),
            }
        }
        "2" => app.week_report(),
        "3" => app.month_report(),
        _ => return writeln!(output, "Invalid choice. Please try again."),
    };

    write_outcome(&outcome, output)
}

fn write_outcome<W: Write>(outcome: &ReportOutcome, output: &mut W) -> io::Result<()> {
    if outcome.is_rendered() {
        writeln!(output)?;
    }
    writeln!(output, "{outcome}")
}

fn view_log_history<S, P, W>(app: &WeatherLogApp<S, P>, output: &mut W) -> io::Result<()>
where
    S: LogStore,
    P: ForecastProvider,
    W: Write,
{
    let entries = match app.history() {
        Ok(entries) => entries,
        Err(e) => return writeln!(output, "Error viewing log history: {}", e.user_message()),
    };

    if entries.is_empty() {
        return writeln!(output, "No log data available.");
    }

    writeln!(output, "\nLog History:")?;
    for entry in &entries {
        writeln!(output, "{entry}")?;
    }
    Ok(())
}
