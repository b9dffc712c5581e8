use lachs::Span;

#[lachs::token]
pub enum Token {
    #[literal("[a-zA-Z][a-zA-Z0-9-]*")]
    Ident,
    #[literal("-?[0-9]+")]
    Integer,
    #[literal(r#""([^"\\]|\\.)*""#)]
    StringLiteral,
    #[literal(r"'([^'\\]|\\.)'")]
    CharLiteral,
    #[terminal("|->")]
    MapsTo,
    #[terminal("|")]
    Bar,
    #[terminal("&")]
    Ampersand,
    #[terminal("~")]
    Tilde,
    #[terminal(",")]
    Comma,
    #[terminal("(")]
    LParen,
    #[terminal(")")]
    RParen,
    #[terminal("[")]
    LBracket,
    #[terminal("]")]
    RBracket,
    #[terminal("{")]
    LBrace,
    #[terminal("}")]
    RBrace,
}

impl Token {
    pub fn pos(&self) -> Span {
        match self {
            Token::Ident(inner) => inner.position.clone(),
            Token::Integer(inner) => inner.position.clone(),
            Token::StringLiteral(inner) => inner.position.clone(),
            Token::CharLiteral(inner) => inner.position.clone(),
            Token::MapsTo(inner) => inner.position.clone(),
            Token::Bar(inner) => inner.position.clone(),
            Token::Ampersand(inner) => inner.position.clone(),
            Token::Tilde(inner) => inner.position.clone(),
            Token::Comma(inner) => inner.position.clone(),
            Token::LParen(inner) => inner.position.clone(),
            Token::RParen(inner) => inner.position.clone(),
            Token::LBracket(inner) => inner.position.clone(),
            Token::RBracket(inner) => inner.position.clone(),
            Token::LBrace(inner) => inner.position.clone(),
            Token::RBrace(inner) => inner.position.clone(),
        }
    }

    /// Returns a human-readable description of the token
    pub fn describe(&self) -> String {
        match self {
            Token::Ident(inner) => format!("identifier '{}'", inner.value),
            Token::Integer(inner) => format!("integer '{}'", inner.value),
            Token::StringLiteral(inner) => format!("string {}", inner.value),
            Token::CharLiteral(inner) => format!("character {}", inner.value),
            Token::MapsTo(_) => "'|->'".to_string(),
            Token::Bar(_) => "'|'".to_string(),
            Token::Ampersand(_) => "'&'".to_string(),
            Token::Tilde(_) => "'~'".to_string(),
            Token::Comma(_) => "','".to_string(),
            Token::LParen(_) => "'('".to_string(),
            Token::RParen(_) => "')'".to_string(),
            Token::LBracket(_) => "'['".to_string(),
            Token::RBracket(_) => "']'".to_string(),
            Token::LBrace(_) => "'{'".to_string(),
            Token::RBrace(_) => "'}'".to_string(),
        }
    }
}
