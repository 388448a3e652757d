macro_rules! horizontal_space_pat {
    () => {
        b' ' | b'\t'
    };
}
macro_rules! vertical_space_pat {
    () => {
        b'\n' | b'\r'
    };
}
macro_rules! ident_pat {
    (start) => {
        b'a'..=b'z' | b'A'..=b'Z' | b'_'
    };
    () => {
        ident_pat!(start) | b'0'..=b'9' | b'\'' | b'-'
    };
}
macro_rules! path_pat {
    () => {
        b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'.' | b'_' | b'-' | b'+'
    };
}
macro_rules! uri_scheme_pat {
    () => {
        b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'+' | b'-' | b'.'
    };
}
macro_rules! uri_body_pat {
    () => {
        b'a'..=b'z'
            | b'A'..=b'Z'
            | b'0'..=b'9'
            | b'%'
            | b'/'
            | b'?'
            | b':'
            | b'@'
            | b'&'
            | b'='
            | b'+'
            | b'$'
            | b','
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
    };
}

pub fn is_identifier_start(char: u8) -> bool {
    matches!(char, ident_pat!(start))
}

pub fn is_identifier_char(char: u8) -> bool {
    matches!(char, ident_pat!())
}

pub fn is_path_char(char: u8) -> bool {
    matches!(char, path_pat!())
}

pub fn is_digit(char: u8) -> bool {
    char.is_ascii_digit()
}
