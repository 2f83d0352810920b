use crate::de::Token;
use crate::emit::Emitter;
use crate::value::Value;
use indexmap::IndexMap;
use std::io;

enum Frame {
    Array(Vec<Value>),
    Object(IndexMap<String, Value>, Option<String>),
}

/// An [`Emitter`] assembling a [`Value`] tree.
#[derive(Default)]
pub struct ValueBuilder {
    stack: Vec<Frame>,
    root: Option<Value>,
}

impl ValueBuilder {
    /// Creates a new `ValueBuilder`.
    pub fn new() -> Self {
        ValueBuilder::default()
    }

    /// Consumes the `ValueBuilder`, returning the completed root value.
    ///
    /// Returns `None` if no complete value has been emitted.
    pub fn finish(self) -> Option<Value> {
        self.root
    }

    fn push_value(&mut self, value: Value) {
        match self.stack.last_mut() {
            None => self.root = Some(value),
            Some(Frame::Array(vec)) => vec.push(value),
            Some(Frame::Object(map, key)) => {
                if let Some(key) = key.take() {
                    map.insert(key, value);
                }
            }
        }
    }

    fn end_container(&mut self) {
        let value = match self.stack.pop() {
            Some(Frame::Array(vec)) => Value::Array(vec),
            Some(Frame::Object(map, _)) => Value::Object(map),
            None => return,
        };
        self.push_value(value);
    }
}

impl<'a> Emitter<'a> for ValueBuilder {
    fn emit(&mut self, token: Token<'a>) -> io::Result<()> {
        let value = match token {
            Token::StartObject => {
                self.stack.push(Frame::Object(IndexMap::new(), None));
                return Ok(());
            }
            Token::StartArray => {
                self.stack.push(Frame::Array(vec![]));
                return Ok(());
            }
            Token::EndObject | Token::EndArray => {
                self.end_container();
                return Ok(());
            }
            Token::FieldName(name) => {
                if let Some(Frame::Object(_, key)) = self.stack.last_mut() {
                    *key = Some(name.to_string());
                }
                return Ok(());
            }
            Token::Null => Value::Null,
            Token::Bool(v) => Value::Boolean(v),
            Token::Integer(v) => Value::Integer(v),
            Token::Long(v) => Value::Long(v),
            Token::BigInteger(v) => Value::BigInteger(v),
            Token::Float(v) => Value::Float(v),
            Token::Double(v) => Value::Double(v),
            Token::BigDecimal(v) => Value::BigDecimal(v),
            Token::String(v) => Value::String(v.to_string()),
            Token::Binary(v) => Value::Binary(v.into_owned()),
        };

        self.push_value(value);
        Ok(())
    }
}
