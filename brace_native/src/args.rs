use clap::builder::{StringValueParser, TypedValueParser};
use emath::{vec2, Vec2};

/// Parses the size of the root view, either `WIDTHxHEIGHT` or a single number for a square.
#[derive(Clone)]
pub struct SizeParser;

impl TypedValueParser for SizeParser {
    type Value = Vec2;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        arg: Option<&clap::Arg>,
        value: &std::ffi::OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let parsed = StringValueParser::new().parse_ref(cmd, arg, value)?;

        parse_size(&parsed).ok_or_else(|| clap::Error::new(clap::error::ErrorKind::InvalidValue))
    }
}

fn parse_size(s: &str) -> Option<Vec2> {
    let mut split = s.split('x');
    let width: f32 = split.next()?.trim().parse().ok()?;
    let height = match split.next() {
        Some(height) => height.trim().parse().ok()?,
        None => width,
    };
    if split.next().is_some() || width < 0.0 || height < 0.0 {
        return None;
    }
    Some(vec2(width, height))
}
