//! Unit tests for Java generation.

use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::generator::generate;
use crate::{
    analyzer::analyzer::analyze, ast::ast::Source, lexer::lexer::tokenize, parser::parser::parse,
};

fn analyzed(source: &str) -> Source {
    let tokens = tokenize(source, Some("test.plc".to_string())).unwrap();
    let mut source = parse(tokens, Rc::new("test.plc".to_string())).unwrap();
    analyze(&mut source).unwrap();
    source
}

fn generated(source: &str) -> String {
    generate(&analyzed(source))
}

#[test]
fn test_minimal_program() {
    let expected = "\
public class Main {

    public static void main(String[] args) {
        System.exit(new Main().main());
    }

    int main() {
        return 0;
    }

}
";
    assert_eq!(generated("fun main() do return 0; end"), expected);
}

#[test]
fn test_full_program() {
    let source = r#"
        var total = 0;
        val l = [1, 2, 3];
        fun add(n: Integer): Integer do total = total + n; return total; end
        fun main() do
            let i = 0;
            while i < 3 do add(l[i]); i = i + 1; end
            if total > 5 do print("big"); else print('s'); end
            switch i case 3: print(3); default: print(0); end
            return total;
        end
    "#;

    let expected = "\
public class Main {

    int total = 0;
    final int[] l = {1, 2, 3};

    public static void main(String[] args) {
        System.exit(new Main().main());
    }

    int add(int n) {
        total = total + n;
        return total;
    }

    int main() {
        int i = 0;
        while (i < 3) {
            add(l[i]);
            i = i + 1;
        }
        if (total > 5) {
            System.out.println(\"big\");
        } else {
            System.out.println('s');
        }
        switch (i) {
            case 3:
                System.out.println(3);
                break;
            default:
                System.out.println(0);
        }
        return total;
    }

}
";
    assert_eq!(generated(source), expected);
}

#[test]
fn test_unannotated_function_is_void() {
    let output = generated("fun noop() do end fun main() do noop(); return 0; end");
    assert!(output.contains("    void noop() {}\n"));
    assert!(output.contains("        noop();\n"));
}

#[test]
fn test_annotated_types_and_declarations() {
    let output = generated(
        "val d: Decimal = 1.5; var c: Character = 'x'; var s: String;
         fun id(value: Any): Any do return value; end
         fun main(): Integer do let b: Boolean = true; return 0; end",
    );
    assert!(output.contains("    final double d = 1.5;\n"));
    assert!(output.contains("    char c = 'x';\n"));
    assert!(output.contains("    String s;\n"));
    assert!(output.contains("    Object id(Object value) {\n"));
    assert!(output.contains("        boolean b = true;\n"));
}

#[test]
fn test_literals_are_escaped() {
    let output = generated(r#"fun main() do print("a\"b\n"); print('\''); print(nil); return 0; end"#);
    assert!(output.contains(r#"        System.out.println("a\"b\n");"#));
    assert!(output.contains(r#"        System.out.println('\'');"#));
    assert!(output.contains("        System.out.println(null);"));
}

#[test]
fn test_groups_and_power() {
    let output = generated("fun main() do return 2 ^ 3 + (1 + 2); end");
    assert!(output.contains("        return (int) Math.pow(2, 3) + (1 + 2);\n"));
}

#[test]
fn test_empty_while_and_else() {
    let output = generated(
        "var x = 0; fun main() do while x > 1 do end if x == 0 do x = 1; end return x; end",
    );
    assert!(output.contains("        while (x > 1) {}\n"));
    assert!(output.contains("        if (x == 0) {\n            x = 1;\n        }\n"));
    assert!(!output.contains("else"));
}

#[test]
fn test_generation_is_deterministic() {
    let source = analyzed("val x = 1; fun main() do return x; end");
    assert_eq!(generate(&source), generate(&source));
}

#[test]
fn test_unannotated_function_returning_value_is_object() {
    let output = generated(
        "fun one() do if true do return 1; end end fun main() do print(one()); return 0; end",
    );
    assert!(output.contains("    Object one() {\n"));
    assert!(output.contains("            return 1;\n"));
}
