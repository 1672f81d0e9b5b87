//! Coloured overlay laid over the page to reduce glare.

use cssparser::{ParseError, Parser, ParserInput, Token};

use crate::dom::{Document, NodeId};
use crate::error::{Error, Result};
use crate::settings::ClassNames;

type ParseResult<'i, T> = std::result::Result<T, ParseError<'i, ()>>;

/// Opacity of the tint layer.
pub const TINT_ALPHA: f32 = 0.2;

/// An opaque sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb`, `#rrggbb` or `rgb(r, g, b)`.
    pub fn parse(value: &str) -> Result<Self> {
        let mut input = ParserInput::new(value);
        let mut parser = Parser::new(&mut input);
        parser
            .parse_entirely(parse_color)
            .map_err(|_| Error::InvalidColor(value.to_string()))
    }

    /// CSS for the translucent layer background.
    pub fn tint_css(&self) -> String {
        format!("rgba({}, {}, {}, {TINT_ALPHA})", self.r, self.g, self.b)
    }
}

fn parse_color<'i>(input: &mut Parser<'i, '_>) -> ParseResult<'i, Rgb> {
    let location = input.current_source_location();
    let token = input.next()?.clone();
    match token {
        Token::IDHash(ref hash) | Token::Hash(ref hash) => {
            parse_hex_color(hash).ok_or_else(|| location.new_custom_error(()))
        }
        Token::Function(ref name) if name.eq_ignore_ascii_case("rgb") => {
            input.parse_nested_block(|input| {
                let r = parse_color_component(input)?;
                input.expect_comma()?;
                let g = parse_color_component(input)?;
                input.expect_comma()?;
                let b = parse_color_component(input)?;
                Ok(Rgb::new(r, g, b))
            })
        }
        _ => Err(location.new_unexpected_token_error(token)),
    }
}

fn parse_hex_color(hex: &str) -> Option<Rgb> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    match hex.len() {
        3 => Some(Rgb::new(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        6 => Some(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        _ => None,
    }
}

fn parse_color_component<'i>(input: &mut Parser<'i, '_>) -> ParseResult<'i, u8> {
    let location = input.current_source_location();
    match input.next()? {
        Token::Number {
            int_value: Some(v),
            ..
        } => Ok((*v).clamp(0, 255) as u8),
        Token::Percentage { unit_value, .. } => {
            Ok((unit_value * 255.0).round().clamp(0.0, 255.0) as u8)
        }
        _ => Err(location.new_custom_error(())),
    }
}

/// Show the tint layer in `color`, creating it unless `layer` is the one
/// injected earlier. Returns the layer.
pub(super) fn set_tint(
    doc: &mut Document,
    body: NodeId,
    classes: &ClassNames,
    color: Rgb,
    layer: Option<NodeId>,
) -> NodeId {
    let layer = match layer {
        Some(layer) => layer,
        None => {
            let layer = doc.create_html_element("div", &[("id", classes.tint_layer.as_str())]);
            doc.append(body, layer);
            layer
        }
    };
    doc.set_style(layer, "background-color", Some(&color.tint_css()));
    doc.set_style(layer, "display", Some("block"));
    layer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgb::parse("#ff8000").unwrap(), Rgb::new(255, 128, 0));
        assert_eq!(Rgb::parse("#FFF").unwrap(), Rgb::new(255, 255, 255));
        assert_eq!(Rgb::parse(" #0a0b0c ").unwrap(), Rgb::new(10, 11, 12));
    }

    #[test]
    fn test_parse_rgb_function() {
        assert_eq!(Rgb::parse("rgb(1, 2, 3)").unwrap(), Rgb::new(1, 2, 3));
        assert_eq!(Rgb::parse("rgb(100%, 0%, 300)").unwrap(), Rgb::new(255, 0, 255));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "red", "#12", "#gggggg", "#ff0000 extra", "rgb(1, 2)"] {
            assert!(
                matches!(Rgb::parse(bad), Err(Error::InvalidColor(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_tint_css() {
        assert_eq!(Rgb::new(255, 0, 10).tint_css(), "rgba(255, 0, 10, 0.2)");
    }
}
