/// Enough room for `i64::MIN`: a sign and 19 digits.
pub const DECIMAL_BUFFER_LEN: usize = 20;

/// Render `value` in decimal into the tail of `buf` and return the used part.
///
/// Digits are taken from the signed remainder so `i64::MIN` never has to be
/// negated.
pub fn format_decimal(value: i64, buf: &mut [u8; DECIMAL_BUFFER_LEN]) -> &[u8] {
    let mut rest = value;
    let mut pos = buf.len();

    loop {
        let digit = (rest % 10).unsigned_abs() as u8;
        pos -= 1;
        buf[pos] = b'0' + digit;
        rest /= 10;
        if rest == 0 {
            break;
        }
    }

    if value < 0 {
        pos -= 1;
        buf[pos] = b'-';
    }

    &buf[pos..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn render(value: i64) -> std::string::String {
        let mut buf = [0; DECIMAL_BUFFER_LEN];
        std::str::from_utf8(format_decimal(value, &mut buf))
            .expect("ascii digits")
            .to_owned()
    }

    #[test]
    fn renders_edge_values() {
        assert_eq!(render(0), "0");
        assert_eq!(render(7), "7");
        assert_eq!(render(-7), "-7");
        assert_eq!(render(10), "10");
        assert_eq!(render(-100), "-100");
        assert_eq!(render(i64::MAX), "9223372036854775807");
        assert_eq!(render(i64::MIN), "-9223372036854775808");
    }

    proptest! {
        #[test]
        fn matches_std_formatting(value in any::<i64>()) {
            prop_assert_eq!(render(value), value.to_string());
        }
    }
}
