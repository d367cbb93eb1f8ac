//! Scanner for the key-value notation used by extracted `.props.txt` files.
//!
//! The notation is undocumented; this follows what the exporter writes:
//!
//! ```text
//! Parent=MaterialInstanceConstant'Mat_Base'
//! VectorParameterValues[1]=
//! {
//!     VectorParameterValues[0]=
//!     {
//!         ParameterName=p_AColorShadow
//!         ParameterValue={ R=0.5, G=0.25, B=0.1, A=1.0 }
//!         ParameterInfo=VectorParameterValue
//!     }
//! }
//! ```
//!
//! - Pairs are separated by newlines or commas.
//! - `key[N]={...}` declares a list of `N` slots whose elements are written
//!   as `name[idx]=value` in any order.
//! - Plain values run to the next `,`, newline, `}` or end of input and keep
//!   interior spaces.

use crate::error::{Result, SkinError};

use super::span::Location;
use super::tree::{Tree, Value};

/// Parse a complete props document into a tree.
pub fn parse_notation(source: &str) -> Result<Tree> {
    Scanner::new(source).parse_document()
}

/// Scanner state: the source and a single cursor that only moves forward.
struct Scanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    fn parse_document(mut self) -> Result<Tree> {
        let mut tree = Tree::new();
        self.skip_whitespace();
        while !self.at_end() {
            let (key, value) = self.parse_pair()?;
            tree.insert(key, value);
            self.skip_whitespace();
        }
        Ok(tree)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn advance(&mut self) {
        if self.pos < self.bytes.len() {
            self.pos += 1;
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn expect(&mut self, expected: u8, what: &str) -> Result<()> {
        if self.peek() == Some(expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(format!("Expected {}", what)))
        }
    }

    fn error(&self, message: impl Into<String>) -> SkinError {
        self.error_at(self.pos, message)
    }

    fn error_at(&self, offset: usize, message: impl Into<String>) -> SkinError {
        SkinError::NotationParse {
            message: message.into(),
            location: Location::from_offset(self.source, offset),
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.advance();
        }
    }

    fn skip_inline_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r')) {
            self.advance();
        }
    }

    /// Parse `key[=|[N]=]value` starting at a key.
    fn parse_pair(&mut self) -> Result<(String, Value)> {
        let key = self.read_key()?;
        let list_len = if self.peek() == Some(b'[') {
            Some(self.read_index("list length")?)
        } else {
            None
        };
        let empty = self.skip_equals()?;
        let value = if empty {
            Value::Scalar(String::new())
        } else {
            self.parse_value(list_len)?
        };
        Ok((key, value))
    }

    fn read_key(&mut self) -> Result<String> {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'_') {
            self.advance();
        }
        if self.pos == start {
            return Err(self.error("Expected a key"));
        }
        Ok(self.source[start..self.pos].to_string())
    }

    /// Read a `[<int>]` suffix.
    fn read_index(&mut self, what: &str) -> Result<usize> {
        self.expect(b'[', "'['")?;
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.advance();
        }
        let digits = &self.source[start..self.pos];
        if digits.is_empty() {
            return Err(self.error(format!("Expected {}", what)));
        }
        let index = digits
            .parse::<usize>()
            .map_err(|_| self.error_at(start, format!("Invalid {}: {}", what, digits)))?;
        self.expect(b']', "']'")?;
        Ok(index)
    }

    /// Consume the `=` and the whitespace run after it.
    ///
    /// Returns `true` when nothing but whitespace follows on the line and no
    /// `{` opens on a later line; the value is then empty and the line end
    /// has been consumed.
    fn skip_equals(&mut self) -> Result<bool> {
        self.skip_whitespace();
        self.expect(b'=', "an equal sign")?;
        self.skip_inline_whitespace();

        match self.peek() {
            None => Ok(true),
            Some(b'\n') => {
                let line_end = self.pos;
                self.skip_whitespace();
                if self.peek() == Some(b'{') {
                    Ok(false)
                } else {
                    self.pos = line_end + 1;
                    Ok(true)
                }
            }
            Some(_) => Ok(false),
        }
    }

    fn parse_value(&mut self, list_len: Option<usize>) -> Result<Value> {
        if self.peek() != Some(b'{') {
            return Ok(Value::Scalar(self.parse_simple()));
        }

        self.advance();
        let value = match list_len {
            Some(len) => self.parse_list(len)?,
            None => Value::Dict(self.parse_dict()?),
        };

        // A separator may follow a closed block
        self.skip_inline_whitespace();
        if self.peek() == Some(b',') {
            self.advance();
        }
        Ok(value)
    }

    /// Read a plain value. Consumes a terminating `,` or newline but leaves
    /// a closing `}` for the enclosing block.
    fn parse_simple(&mut self) -> String {
        let start = self.pos;
        loop {
            match self.peek() {
                None | Some(b'}') => return self.source[start..self.pos].to_string(),
                Some(b',') => {
                    let value = self.source[start..self.pos].to_string();
                    self.advance();
                    return value;
                }
                Some(b'\n') => {
                    let raw = &self.source[start..self.pos];
                    let value = raw.strip_suffix('\r').unwrap_or(raw).to_string();
                    self.advance();
                    return value;
                }
                Some(_) => self.advance(),
            }
        }
    }

    /// Parse a dict body; the opening `{` is already consumed.
    fn parse_dict(&mut self) -> Result<Tree> {
        let mut tree = Tree::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b'}') => {
                    self.advance();
                    return Ok(tree);
                }
                None => return Err(self.error("Unexpected end of input: unclosed '{'")),
                Some(_) => {
                    let (key, value) = self.parse_pair()?;
                    tree.insert(key, value);
                }
            }
        }
    }

    /// Parse a list body of `name[idx]=value` elements into `len` slots.
    fn parse_list(&mut self, len: usize) -> Result<Value> {
        let mut slots: Vec<Option<Value>> = vec![None; len];
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b'}') => {
                    self.advance();
                    return Ok(Value::List(slots));
                }
                None => return Err(self.error("Unexpected end of input: unclosed list")),
                Some(_) => {
                    let key_start = self.pos;
                    let key = self.read_key()?;
                    if self.peek() != Some(b'[') {
                        return Err(self.error(format!("List element '{}' has no index", key)));
                    }
                    let index = self.read_index("list index")?;
                    let empty = self.skip_equals()?;
                    let value = if empty {
                        Value::Scalar(String::new())
                    } else {
                        self.parse_value(None)?
                    };

                    let slot = slots.get_mut(index).ok_or_else(|| {
                        self.error_at(
                            key_start,
                            format!("List index {} out of range for length {}", index, len),
                        )
                    })?;
                    if slot.is_some() {
                        return Err(self.error_at(
                            key_start,
                            format!("Duplicate list index {} for '{}'", index, key),
                        ));
                    }
                    *slot = Some(value);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scalar(s: &str) -> Value {
        Value::Scalar(s.to_string())
    }

    fn err_location(source: &str) -> Location {
        match parse_notation(source) {
            Err(SkinError::NotationParse { location, .. }) => location,
            other => panic!("expected notation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_simple_pairs() {
        let tree = parse_notation("A=1\nB=two words\nC=x,D=y").unwrap();

        assert_eq!(tree.len(), 4);
        assert_eq!(tree["A"], scalar("1"));
        assert_eq!(tree["B"], scalar("two words"));
        assert_eq!(tree["C"], scalar("x"));
        assert_eq!(tree["D"], scalar("y"));
    }

    #[test]
    fn test_value_keeps_interior_spaces_and_strips_leading() {
        let tree = parse_notation("Name=   Some  Value \n").unwrap();
        assert_eq!(tree["Name"], scalar("Some  Value "));
    }

    #[test]
    fn test_crlf_line_endings() {
        let tree = parse_notation("A=1\r\nB=2\r\n").unwrap();
        assert_eq!(tree["A"], scalar("1"));
        assert_eq!(tree["B"], scalar("2"));
    }

    #[test]
    fn test_empty_value_before_newline() {
        let tree = parse_notation("Empty= \nNext=1").unwrap();
        assert_eq!(tree["Empty"], scalar(""));
        assert_eq!(tree["Next"], scalar("1"));
    }

    #[test]
    fn test_empty_value_at_end_of_input() {
        let tree = parse_notation("Empty=").unwrap();
        assert_eq!(tree["Empty"], scalar(""));
    }

    #[test]
    fn test_whitespace_before_equals() {
        let tree = parse_notation("Key  = value").unwrap();
        assert_eq!(tree["Key"], scalar("value"));
    }

    #[test]
    fn test_nested_dict_inline() {
        let tree = parse_notation("Color={ R=0.5, G=0.25, B=0.1, A=1.0 }").unwrap();

        let dict = tree["Color"].as_dict().unwrap();
        assert_eq!(dict["R"], scalar("0.5"));
        assert_eq!(dict["G"], scalar("0.25"));
        assert_eq!(dict["B"], scalar("0.1"));
        assert_eq!(dict["A"], scalar("1.0 "));
    }

    #[test]
    fn test_dict_on_next_line() {
        let source = "Outer=\n{\n    Inner=\n    {\n        X=1\n    }\n    Y=2\n}\nZ=3\n";
        let tree = parse_notation(source).unwrap();

        let outer = tree["Outer"].as_dict().unwrap();
        let inner = outer["Inner"].as_dict().unwrap();
        assert_eq!(inner["X"], scalar("1"));
        assert_eq!(outer["Y"], scalar("2"));
        assert_eq!(tree["Z"], scalar("3"));
    }

    #[test]
    fn test_empty_dict() {
        let tree = parse_notation("Nothing={}\nA=1").unwrap();
        assert_eq!(tree["Nothing"], Value::Dict(Tree::new()));
        assert_eq!(tree["A"], scalar("1"));
    }

    #[test]
    fn test_comma_after_dict() {
        let tree = parse_notation("Outer={A={X=1}, B=2}").unwrap();
        let outer = tree["Outer"].as_dict().unwrap();
        assert_eq!(outer["A"].as_dict().unwrap()["X"], scalar("1"));
        assert_eq!(outer["B"], scalar("2"));
    }

    #[test]
    fn test_list_in_index_order_regardless_of_source_order() {
        let source = "Items[3]=\n{\n    Items[2]=c\n    Items[0]=a\n    Items[1]=b\n}\n";
        let tree = parse_notation(source).unwrap();

        assert_eq!(
            tree["Items"],
            Value::List(vec![Some(scalar("a")), Some(scalar("b")), Some(scalar("c"))])
        );
    }

    #[test]
    fn test_list_unfilled_slots_are_none() {
        let tree = parse_notation("Items[3]={Items[1]=b}").unwrap();
        assert_eq!(tree["Items"], Value::List(vec![None, Some(scalar("b")), None]));
    }

    #[test]
    fn test_list_of_dicts() {
        let source = r#"TextureParameterValues[2]=
{
    TextureParameterValues[1]=
    {
        ParameterName=p_Masks
        ParameterValue=Texture2D'GD_Skins.Textures.Mask'
        ParameterInfo=TextureParameterValue
    }
    TextureParameterValues[0]=
    {
        ParameterName=p_Diffuse
        ParameterValue=Texture2D'GD_Skins.Textures.Dif'
        ParameterInfo=TextureParameterValue
    }
}
"#;
        let tree = parse_notation(source).unwrap();
        let items = tree["TextureParameterValues"].as_list().unwrap();

        assert_eq!(items.len(), 2);
        let first = items[0].as_ref().unwrap().as_dict().unwrap();
        assert_eq!(first["ParameterName"], scalar("p_Diffuse"));
        let second = items[1].as_ref().unwrap().as_dict().unwrap();
        assert_eq!(
            second["ParameterValue"],
            scalar("Texture2D'GD_Skins.Textures.Mask'")
        );
    }

    #[test]
    fn test_list_key_with_scalar_value() {
        let tree = parse_notation("Arr[2]=plain").unwrap();
        assert_eq!(tree["Arr"], scalar("plain"));
    }

    #[test]
    fn test_empty_and_whitespace_documents() {
        assert!(parse_notation("").unwrap().is_empty());
        assert!(parse_notation("  \n\t\n").unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let tree = parse_notation("A=1\nB=2\nA=3").unwrap();
        assert_eq!(tree["A"], scalar("3"));
        assert_eq!(tree.get_index(0).map(|(k, _)| k.as_str()), Some("A"));
    }

    #[test]
    fn test_missing_equals_is_error() {
        let location = err_location("Key value");
        assert_eq!(location.offset, 4);
        assert_eq!(location.line, 1);
    }

    #[test]
    fn test_unclosed_dict_is_error() {
        let location = err_location("A={\n B=1\n");
        assert_eq!(location.line, 3);
    }

    #[test]
    fn test_unclosed_list_is_error() {
        assert!(parse_notation("L[1]={L[0]=a").is_err());
    }

    #[test]
    fn test_list_index_out_of_range() {
        let location = err_location("L[2]={\nL[2]=a\n}");
        assert_eq!(location.line, 2);
        assert_eq!(location.column, 1);
    }

    #[test]
    fn test_list_duplicate_index() {
        assert!(parse_notation("L[2]={L[0]=a,L[0]=b}").is_err());
    }

    #[test]
    fn test_list_element_without_index() {
        assert!(parse_notation("L[1]={Elem=a}").is_err());
    }

    #[test]
    fn test_malformed_length_suffix() {
        assert!(parse_notation("L[]={}").is_err());
        assert!(parse_notation("L[x]={}").is_err());
        assert!(parse_notation("L[2={}").is_err());
    }

    #[test]
    fn test_stray_closing_brace_at_top_level() {
        assert!(parse_notation("A=1}").is_err());
    }

    #[test]
    fn test_empty_list() {
        let tree = parse_notation("L[0]={}").unwrap();
        assert_eq!(tree["L"], Value::List(vec![]));
    }
}
