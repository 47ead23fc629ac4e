/// Frontend independent input, fed to scenes once per event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(String),
    KeyUp(String),
    MouseMove { dx: f32, dy: f32 },
    MouseButton { pressed: bool },
    Wheel { delta: f32 },
    /// Pointer captured (true) or released (false)
    PointerLock(bool),
    Resize { width: u32, height: u32 },
}

/// Maps a key name such as `"W"` or `"5"` to the browser style code
/// (`"KeyW"`, `"Digit5"`) used by key bindings.
pub fn browser_code(name: &str) -> String {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => format!("Key{}", c.to_ascii_uppercase()),
        (Some(c), None) if c.is_ascii_digit() => format!("Digit{}", c),
        _ => name.replace(' ', ""),
    }
}

/// Human readable label for a binding, `"KeyE"` -> `"E"`.
pub fn key_label(code: &str) -> &str {
    code.strip_prefix("Key")
        .or_else(|| code.strip_prefix("Digit"))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits() {
        assert_eq!(browser_code("W"), "KeyW");
        assert_eq!(browser_code("e"), "KeyE");
        assert_eq!(browser_code("5"), "Digit5");
    }

    #[test]
    fn named_keys_pass_through() {
        assert_eq!(browser_code("Space"), "Space");
        assert_eq!(browser_code("Left Shift"), "LeftShift");
    }

    #[test]
    fn labels() {
        assert_eq!(key_label("KeyE"), "E");
        assert_eq!(key_label("Digit1"), "1");
        assert_eq!(key_label("Space"), "Space");
        assert_eq!(key_label("Key"), "Key");
    }
}
