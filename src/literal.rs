//! Decodificador de literales embebidos en celdas CSV.
//!
//! Las columnas `ingredients`, `steps`, `tags` y `nutrition` del dataset de
//! Food.com guardan listas serializadas como texto (p. ej.
//! `"['easy', 'desserts']"` o `"[51.5, 0.0, 13.0]"`). Este módulo las
//! convierte en secuencias reales con un parser descendente recursivo que
//! sólo reconoce listas/tuplas de cadenas y números. Nunca se evalúa el
//! contenido como código: cualquier otro token es un error.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Profundidad máxima de anidamiento aceptada.
const MAX_DEPTH: usize = 64;

/// Valor de una celda tal y como llega desde la capa de datos.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    /// Marcador de "sin valor" del dataset.
    Missing,
    /// Texto con la codificación literal de una lista o tupla.
    Text(&'a str),
    /// Secuencia ya estructurada; se devuelve sin volver a decodificar.
    Sequence(&'a [Element]),
}

impl<'a> From<Option<&'a str>> for Cell<'a> {
    fn from(value: Option<&'a str>) -> Self {
        match value {
            Some(text) => Cell::Text(text),
            None => Cell::Missing,
        }
    }
}

/// Elemento decodificado de una secuencia.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Element {
    Str(String),
    Int(i64),
    Float(f64),
    List(Vec<Element>),
}

impl Element {
    /// Valor numérico del elemento, si lo es.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Element::Int(n) => Some(*n as f64),
            Element::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Representación textual para mostrar en la interfaz.
    pub fn as_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Str(s) => write!(f, "{s}"),
            Element::Int(n) => write!(f, "{n}"),
            Element::Float(x) => write!(f, "{x:?}"),
            Element::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Resultado "decodificación fallida". Distinto de una secuencia vacía.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("la celda no tiene valor")]
    Missing,
    #[error("fin de texto inesperado")]
    UnexpectedEnd,
    #[error("carácter inesperado '{found}' en la posición {pos}")]
    Unexpected { found: char, pos: usize },
    #[error("secuencia de escape inválida en la posición {0}")]
    InvalidEscape(usize),
    #[error("número inválido: '{0}'")]
    InvalidNumber(String),
    #[error("se esperaba una lista o una tupla")]
    NotASequence,
    #[error("anidamiento demasiado profundo (máximo 64 niveles)")]
    TooDeep,
    #[error("contenido sobrante a partir de la posición {0}")]
    TrailingInput(usize),
    #[error("el elemento {0} no es numérico")]
    NonNumeric(usize),
}

/// Decodifica una celda en una secuencia ordenada de elementos.
///
/// - `Cell::Missing` → `Err(DecodeError::Missing)`.
/// - `"[]"` → `Ok(vec![])`.
/// - Entrada mal formada o truncada → `Err`, nunca una secuencia parcial.
pub fn decode(cell: &Cell<'_>) -> Result<Vec<Element>, DecodeError> {
    match cell {
        Cell::Missing => Err(DecodeError::Missing),
        Cell::Sequence(items) => Ok(items.to_vec()),
        Cell::Text(text) => Parser::new(text).parse_root(),
    }
}

/// Atajo para decodificar directamente un texto.
pub fn decode_str(text: &str) -> Result<Vec<Element>, DecodeError> {
    decode(&Cell::Text(text))
}

/// Decodifica la celda y devuelve cada elemento como texto de presentación.
pub fn decode_strings(cell: &Cell<'_>) -> Result<Vec<String>, DecodeError> {
    Ok(decode(cell)?.iter().map(Element::as_text).collect())
}

/// Decodifica un vector numérico (p. ej. `nutrition`). Falla si algún
/// elemento no es un número.
pub fn decode_numbers(cell: &Cell<'_>) -> Result<Vec<f64>, DecodeError> {
    decode(cell)?
        .iter()
        .enumerate()
        .map(|(index, item)| item.as_f64().ok_or(DecodeError::NonNumeric(index)))
        .collect()
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0, depth: 0 }
    }

    fn parse_root(mut self) -> Result<Vec<Element>, DecodeError> {
        self.skip_ws();
        if !matches!(self.peek(), Some('[') | Some('(')) {
            return match self.peek() {
                None => Err(DecodeError::UnexpectedEnd),
                Some(_) => Err(DecodeError::NotASequence),
            };
        }
        let value = self.parse_value()?;
        self.skip_ws();
        if self.pos < self.src.len() {
            return Err(DecodeError::TrailingInput(self.pos));
        }
        match value {
            Element::List(items) => Ok(items),
            // "(1)" es una agrupación, no una tupla.
            _ => Err(DecodeError::NotASequence),
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn unexpected(&self) -> DecodeError {
        match self.peek() {
            Some(found) => DecodeError::Unexpected { found, pos: self.pos },
            None => DecodeError::UnexpectedEnd,
        }
    }

    fn enter(&mut self) -> Result<(), DecodeError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(DecodeError::TooDeep);
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_value(&mut self) -> Result<Element, DecodeError> {
        self.skip_ws();
        match self.peek() {
            Some('[') => self.parse_list(),
            Some('(') => self.parse_paren(),
            Some('\'') | Some('"') => self.parse_string().map(Element::Str),
            Some(c) if c == '-' || c == '+' || c == '.' || c.is_ascii_digit() => {
                self.parse_number()
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_list(&mut self) -> Result<Element, DecodeError> {
        self.bump();
        self.enter()?;
        let items = self.parse_items(']', Vec::new())?;
        self.leave();
        Ok(Element::List(items))
    }

    /// `()` tupla vacía, `(x)` agrupación, `(x,)` / `(x, y)` tupla.
    fn parse_paren(&mut self) -> Result<Element, DecodeError> {
        self.bump();
        self.enter()?;
        self.skip_ws();
        if self.peek() == Some(')') {
            self.bump();
            self.leave();
            return Ok(Element::List(Vec::new()));
        }

        let first = self.parse_value()?;
        self.skip_ws();
        let value = match self.peek() {
            Some(')') => {
                self.bump();
                first
            }
            Some(',') => {
                self.bump();
                Element::List(self.parse_items(')', vec![first])?)
            }
            _ => return Err(self.unexpected()),
        };
        self.leave();
        Ok(value)
    }

    /// Elementos separados por comas hasta `close`, admitiendo coma final.
    fn parse_items(
        &mut self,
        close: char,
        mut items: Vec<Element>,
    ) -> Result<Vec<Element>, DecodeError> {
        loop {
            self.skip_ws();
            if self.peek() == Some(close) {
                self.bump();
                return Ok(items);
            }
            items.push(self.parse_value()?);
            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(c) if c == close => {
                    self.bump();
                    return Ok(items);
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn parse_string(&mut self) -> Result<String, DecodeError> {
        let quote = self.bump().ok_or(DecodeError::UnexpectedEnd)?;
        let mut out = String::new();
        loop {
            let start = self.pos;
            let c = self.bump().ok_or(DecodeError::UnexpectedEnd)?;
            match c {
                c if c == quote => return Ok(out),
                '\n' | '\r' => {
                    return Err(DecodeError::Unexpected { found: c, pos: start });
                }
                '\\' => self.parse_escape(start, &mut out)?,
                c => out.push(c),
            }
        }
    }

    fn parse_escape(&mut self, start: usize, out: &mut String) -> Result<(), DecodeError> {
        let c = self.bump().ok_or(DecodeError::UnexpectedEnd)?;
        match c {
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'v' => out.push('\u{0B}'),
            // Continuación de línea.
            '\n' => {}
            'x' => out.push(self.parse_hex(2, start)?),
            'u' => out.push(self.parse_hex(4, start)?),
            'U' => out.push(self.parse_hex(8, start)?),
            '0'..='7' => {
                let mut code = c.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match self.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            self.bump();
                            code = code * 8 + d;
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(code).ok_or(DecodeError::InvalidEscape(start))?);
            }
            // Escapes desconocidos se conservan tal cual.
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Ok(())
    }

    fn parse_hex(&mut self, digits: usize, start: usize) -> Result<char, DecodeError> {
        let mut code: u32 = 0;
        for _ in 0..digits {
            let d = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or(DecodeError::InvalidEscape(start))?;
            code = code * 16 + d;
        }
        char::from_u32(code).ok_or(DecodeError::InvalidEscape(start))
    }

    fn parse_number(&mut self) -> Result<Element, DecodeError> {
        let start = self.pos;
        if matches!(self.peek(), Some('-') | Some('+')) {
            self.bump();
        }
        let mut digits = self.eat_digits();
        let mut is_float = false;

        if self.peek() == Some('.') {
            self.bump();
            is_float = true;
            digits += self.eat_digits();
        }
        if digits == 0 {
            return Err(DecodeError::InvalidNumber(self.src[start..self.pos].to_string()));
        }
        if matches!(self.peek(), Some('e') | Some('E')) {
            self.bump();
            is_float = true;
            if matches!(self.peek(), Some('-') | Some('+')) {
                self.bump();
            }
            if self.eat_digits() == 0 {
                return Err(DecodeError::InvalidNumber(self.src[start..self.pos].to_string()));
            }
        }

        let text = &self.src[start..self.pos];
        if !is_float {
            if let Ok(n) = text.parse::<i64>() {
                return Ok(Element::Int(n));
            }
        }
        text.parse::<f64>()
            .map(Element::Float)
            .map_err(|_| DecodeError::InvalidNumber(text.to_string()))
    }

    fn eat_digits(&mut self) -> usize {
        let mut count = 0;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.bump();
            count += 1;
        }
        count
    }
}
