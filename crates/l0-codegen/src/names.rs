//! Primitive-name-to-C-symbol mapping and C string-literal escaping.

/// Maps an L0 primitive name to the C function the runtime exports for it,
/// or `None` if `name` isn't a known primitive (in which case the emitter
/// falls back to the generic `apply` call).
#[must_use]
pub fn primitive_c_symbol(name: &str) -> Option<&'static str> {
    Some(match name {
        "cons" => "l0_prim_cons",
        "car" => "l0_prim_car",
        "cdr" => "l0_prim_cdr",
        "pair?" => "l0_prim_is_pair",
        "null?" => "l0_prim_is_null",
        "list" => "l0_prim_list",
        "append" => "l0_prim_append",
        "+" => "l0_prim_add",
        "-" => "l0_prim_sub",
        "*" => "l0_prim_mul",
        "/" => "l0_prim_div",
        "=" => "l0_prim_num_eq",
        "<" => "l0_prim_num_lt",
        ">" => "l0_prim_num_gt",
        "integer?" => "l0_prim_is_integer",
        "boolean?" => "l0_prim_is_boolean",
        "symbol?" => "l0_prim_is_symbol",
        "string?" => "l0_prim_is_string",
        "float?" => "l0_prim_is_float",
        "closure?" => "l0_prim_is_closure",
        "not" => "l0_prim_not",
        "string-append" => "l0_prim_string_append",
        "string->symbol" => "l0_prim_string_to_symbol",
        "symbol->string" => "l0_prim_symbol_to_string",
        "string-length" => "l0_prim_string_length",
        "string-ref" => "l0_prim_string_ref",
        "substring" => "l0_prim_substring",
        "number->string" => "l0_prim_number_to_string",
        "print" => "l0_prim_print",
        "read-file" => "l0_prim_read_file",
        "write-file" => "l0_prim_write_file",
        "command-line-args" => "l0_prim_command_line_args",
        "parse-string" => "l0_prim_parse_string",
        "codegen-program" => "l0_prim_codegen_program",
        "get-last-error-message" => "l0_prim_get_last_error_message",
        "get-last-error-line" => "l0_prim_get_last_error_line",
        "get-last-error-col" => "l0_prim_get_last_error_col",
        "eval" => "l0_prim_eval",
        "apply" => "l0_prim_apply",
        "eval-in-compiler-env" => "l0_prim_eval_in_compiler_env",
        "is-macro?" => "l0_prim_is_macro",
        "get-macro-transformer" => "l0_prim_get_macro_transformer",
        "deref" => "l0_prim_deref",
        _ => return None,
    })
}

/// Escapes `text` for embedding inside a C string literal (without the
/// surrounding quotes).
#[must_use]
pub fn escape_c_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_primitive_maps_to_its_c_symbol() {
        assert_eq!(primitive_c_symbol("+"), Some("l0_prim_add"));
        assert_eq!(primitive_c_symbol("car"), Some("l0_prim_car"));
    }

    #[test]
    fn unknown_name_is_not_a_primitive() {
        assert_eq!(primitive_c_symbol("my-helper"), None);
    }

    #[test]
    fn string_escaping_covers_the_c_literal_specials() {
        assert_eq!(escape_c_string("a\"b\\c\nd"), "a\\\"b\\\\c\\nd");
    }
}
