use clap::{App, AppSettings, Arg, ErrorKind};
use std::ffi::OsString;
use std::path::PathBuf;
use ttc2ttf::{Error, Request};

pub const USAGE: &str = "ttc2ttf input.ttc [font_index output.ttf]";

pub enum Invocation {
    /// `--help` or `--version`; calling `exit()` on it prints the text and exits 0.
    Info(clap::Error),
    Run(Request),
}

pub fn app() -> App<'static, 'static> {
    App::new("ttc2ttf")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(concat!(env!("CARGO_PKG_VERSION"), "\nLicense: MIT"))
        .about("Split TTF files from a TTC font collection")
        .usage(USAGE)
        .setting(AppSettings::AllowNegativeNumbers)
        .arg(
            Arg::with_name("INPUT")
                .help("The font collection to split")
                .required(true),
        )
        .arg(
            Arg::with_name("INDEX")
                .help("Index of the font to extract; without it every font is written to fontN.ttf")
                .required(false),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("Sets the output file to use")
                .required(false),
        )
}

pub fn read_args<I, T>(args: I) -> Result<Invocation, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match app().get_matches_from_safe(args) {
        Ok(matches) => matches,
        Err(e) if e.kind == ErrorKind::HelpDisplayed || e.kind == ErrorKind::VersionDisplayed => {
            return Ok(Invocation::Info(e));
        }
        Err(e) => {
            log::debug!("{}", e.message);
            return Err(Error::InvalidArguments);
        }
    };

    let input = PathBuf::from(matches.value_of_os("INPUT").ok_or(Error::InvalidArguments)?);
    let index = match matches.value_of_os("INDEX") {
        Some(index) => Some(index.to_str().ok_or(Error::InvalidArguments)?),
        None => None,
    };
    match (index, matches.value_of_os("OUTPUT")) {
        (None, None) => Ok(Invocation::Run(Request::AllFonts { input })),
        (Some(index), Some(output)) => Ok(Invocation::Run(Request::SingleFont {
            input,
            index: parse_index(index)?,
            output: PathBuf::from(output),
        })),
        _ => Err(Error::InvalidArguments),
    }
}

fn parse_index(index: &str) -> Result<u32, Error> {
    let index: i64 = index.trim().parse().map_err(|_| Error::InvalidArguments)?;
    if index < 0 || index > i64::from(u32::MAX) {
        return Err(Error::BadFontIndex { index, count: None });
    }
    Ok(index as u32)
}

/// Print `err` the way the tool always has and return the exit status.
pub fn report(err: &Error) -> i32 {
    eprintln!("Error: {}", err);
    if let Some(source) = std::error::Error::source(err) {
        log::debug!("caused by: {}", source);
    }
    if let Error::InvalidArguments = err {
        eprintln!("Usage: {}", USAGE);
    }
    err.exit_code()
}
