use super::*;
use crate::parse_source;
use crate::semantic::report::render;
use pretty_assertions::assert_eq;

fn build(src: &str) -> SemanticResult<SymbolTable> {
    let program = parse_source(src).expect("test program should parse");
    analyze(&program)
}

fn builder_after(src: &str) -> SymbolTableBuilder {
    let program = parse_source(src).expect("test program should parse");
    let mut builder = SymbolTableBuilder::new();
    walker::walk(&mut builder, &program).expect("no duplicate declarations");
    builder
}

fn program_with_main(body: &str) -> String {
    format!(
        "PROGRAM test\nBEGIN\n  FUNCTION VOID main()\n  BEGIN\n{}\n  END\nEND\n",
        body
    )
}

fn symbol_names(scope: &Scope) -> Vec<(&str, &str)> {
    scope
        .symbols
        .iter()
        .map(|s| (s.name.as_str(), s.declared_type.as_str()))
        .collect()
}

fn scope_names(table: &SymbolTable) -> Vec<&str> {
    table.iter().map(|s| s.name.as_str()).collect()
}

#[test]
fn test_variable_list_keeps_order_and_type() {
    let table = build(&program_with_main("INT c, a, b; FLOAT x;")).unwrap();
    let main = table.lookup("main").unwrap();
    assert_eq!(
        symbol_names(main),
        vec![("c", "INT"), ("a", "INT"), ("b", "INT"), ("x", "FLOAT")]
    );
}

#[test]
fn test_parameters_are_declared_in_function_scope() {
    let table = build(
        "PROGRAM p BEGIN FUNCTION INT add(INT a, FLOAT b) BEGIN INT c; RETURN a; END END",
    )
    .unwrap();
    let add = table.lookup("add").unwrap();
    assert_eq!(add.kind, ScopeKind::Function);
    assert_eq!(symbol_names(add), vec![("a", "INT"), ("b", "FLOAT"), ("c", "INT")]);
}

#[test]
fn test_global_declarations() {
    let table = build("PROGRAM p BEGIN INT g; STRING banner := \"hey\"; END").unwrap();
    assert_eq!(scope_names(&table), vec!["GLOBAL"]);
    let global = table.lookup("GLOBAL").unwrap();
    assert_eq!(global.kind, ScopeKind::Global);
    assert_eq!(global.symbols[1].literal_value.as_deref(), Some("\"hey\""));
}

#[test]
fn test_duplicate_in_same_scope_is_fatal() {
    let err = build(&program_with_main("INT a; FLOAT a;")).unwrap_err();
    assert!(matches!(
        &err,
        SemanticError::DuplicateDeclaration { name, .. } if name == "a"
    ));
    assert_eq!(err.to_string(), "DECLARATION ERROR a");
}

#[test]
fn test_duplicate_reports_both_spans() {
    let src = "PROGRAM p BEGIN INT dup; STRING dup := \"x\"; END";
    match build(src).unwrap_err() {
        SemanticError::DuplicateDeclaration {
            name,
            span,
            previous,
        } => {
            assert_eq!(name, "dup");
            assert_eq!(&src[previous], "dup");
            assert_eq!(&src[span.clone()], "dup");
            assert!(span.start > 20);
        }
    }
}

#[test]
fn test_local_shadowing_parameter_is_duplicate() {
    let err = build("PROGRAM p BEGIN FUNCTION VOID f(INT x) BEGIN INT x; END END").unwrap_err();
    assert_eq!(err.to_string(), "DECLARATION ERROR x");
}

#[test]
fn test_duplicate_inside_block() {
    let err = build(&program_with_main("IF (1 < 2) INT q, q; ENDIF")).unwrap_err();
    assert_eq!(err.to_string(), "DECLARATION ERROR q");
}

#[test]
fn test_first_duplicate_wins() {
    let err = build(&program_with_main(
        "INT a, b;\nIF (a < b) INT c, c; ENDIF\nIF (a < b) ENDIF",
    ))
    .unwrap_err();
    assert_eq!(err.to_string(), "DECLARATION ERROR c");

    let err = build("PROGRAM p BEGIN INT z, z; FUNCTION VOID main() BEGIN INT y, y; END END")
        .unwrap_err();
    assert_eq!(err.to_string(), "DECLARATION ERROR z");
}

#[test]
fn test_same_name_in_different_scopes_is_fine() {
    let table = build(
        "PROGRAM p BEGIN INT x; FUNCTION VOID main() BEGIN INT x; IF (x < 1) INT x; ENDIF END END",
    )
    .unwrap();
    assert_eq!(scope_names(&table), vec!["GLOBAL", "main", "BLOCK 2"]);
}

#[test]
fn test_function_scopes_are_named_after_functions() {
    let src = "\
PROGRAM p
BEGIN
  INT g;
  FUNCTION INT foo(INT a)
  BEGIN
    INT b;
    RETURN a;
  END
  FUNCTION VOID main()
  BEGIN
    INT m;
  END
END";
    let table = build(src).unwrap();
    assert_eq!(scope_names(&table), vec!["GLOBAL", "foo", "main"]);
    assert_eq!(render(&table), "Symbol table main\nname m type INT\n\n");
}

#[test]
fn test_empty_function_scope_is_kept() {
    let table = build("PROGRAM p BEGIN FUNCTION VOID helper() BEGIN END END").unwrap();
    assert_eq!(scope_names(&table), vec!["GLOBAL", "helper"]);
}

#[test]
fn test_block_counter_is_shared_between_functions() {
    let src = "\
PROGRAM p
BEGIN
  FUNCTION VOID foo()
  BEGIN
    IF (1 < 2) INT x; ENDIF
  END
  FUNCTION VOID main()
  BEGIN
    IF (1 < 2) INT y; ENDIF
  END
END";
    let table = build(src).unwrap();
    assert_eq!(scope_names(&table), vec!["GLOBAL", "foo", "BLOCK 2", "main", "BLOCK 5"]);
    assert_eq!(
        render(&table),
        "\
Symbol table BLOCK 2
name x type INT

Symbol table BLOCK 5
name y type INT

Symbol table main

"
    );
}

#[test]
fn test_function_body_opens_its_own_block() {
    let builder = builder_after("PROGRAM p BEGIN FUNCTION VOID main() BEGIN END END");
    // BLOCK 1 went to the body's statement list and was dropped as empty.
    assert_eq!(builder.next_block_number(), 2);
    assert_eq!(scope_names(builder.table()), vec!["GLOBAL", "main"]);
}

#[test]
fn test_if_body_is_not_scoped_twice() {
    let builder = builder_after(&program_with_main("IF (1 < 2) INT x; ENDIF"));
    // body statement list: 1, IF: 2, implicit ELSE: 3
    assert_eq!(builder.next_block_number(), 4);
    let table = builder.finish();
    assert_eq!(scope_names(&table), vec!["GLOBAL", "main", "BLOCK 2"]);
    assert_eq!(symbol_names(table.lookup("BLOCK 2").unwrap()), vec![("x", "INT")]);
}

#[test]
fn test_nested_control_flow_numbering() {
    let src = program_with_main(
        "\
    INT a;
    IF (a < 1)
      INT x;
      IF (a < 2)
        INT y;
      ELSE
        INT z;
      ENDIF
    ELSE
      INT w;
    ENDIF",
    );
    let table = build(&src).unwrap();
    assert_eq!(
        render(&table),
        "\
Symbol table BLOCK 2
name x type INT

Symbol table BLOCK 3
name y type INT

Symbol table BLOCK 4
name z type INT

Symbol table BLOCK 5
name w type INT

Symbol table main
name a type INT

"
    );
}

#[test]
fn test_while_opens_block() {
    let table = build(&program_with_main(
        "INT i;\nWHILE (i < 3) FLOAT f; i := i + 1; ENDWHILE",
    ))
    .unwrap();
    assert_eq!(scope_names(&table), vec!["GLOBAL", "main", "BLOCK 2"]);
    assert_eq!(symbol_names(table.lookup("BLOCK 2").unwrap()), vec![("f", "FLOAT")]);
}

#[test]
fn test_statement_list_inside_while_inside_if_is_suppressed() {
    let builder = builder_after(&program_with_main(
        "IF (1 < 2) WHILE (1 < 2) INT deep; ENDWHILE ENDIF",
    ));
    // body list 1, IF 2, WHILE 3, implicit ELSE 4
    assert_eq!(builder.next_block_number(), 5);
    let table = builder.finish();
    assert_eq!(scope_names(&table), vec!["GLOBAL", "main", "BLOCK 3"]);
}

#[test]
fn test_report_sorts_block_names_as_strings() {
    let body = (1..=5)
        .map(|i| format!("IF (1 < 2) INT v{}; ENDIF", i))
        .collect::<Vec<_>>()
        .join("\n");
    let table = build(&program_with_main(&body)).unwrap();
    let headers: Vec<String> = render(&table)
        .lines()
        .filter(|l| l.starts_with("Symbol table"))
        .map(str::to_string)
        .collect();
    assert_eq!(
        headers,
        vec![
            "Symbol table BLOCK 10",
            "Symbol table BLOCK 2",
            "Symbol table BLOCK 4",
            "Symbol table BLOCK 6",
            "Symbol table BLOCK 8",
            "Symbol table main",
        ]
    );
}

#[test]
fn test_string_declaration_keeps_quotes() {
    let table = build(&program_with_main("STRING s := \"hi\";")).unwrap();
    let symbol = &table.lookup("main").unwrap().symbols[0];
    assert_eq!(symbol.declared_type, "STRING");
    assert_eq!(symbol.literal_value.as_deref(), Some("\"hi\""));
    assert_eq!(render(&table), "Symbol table main\nname s type STRING value \"hi\"\n\n");
}

#[test]
fn test_empty_blocks_leave_no_trace() {
    let table = build(&program_with_main(
        "INT a;\nIF (a < 1) a := 2; ELSE a := 3; ENDIF\nWHILE (a > 0) a := a - 1; ENDWHILE",
    ))
    .unwrap();
    assert_eq!(scope_names(&table), vec!["GLOBAL", "main"]);
    assert_eq!(render(&table), "Symbol table main\nname a type INT\n\n");
}

#[test]
fn test_current_scope_returns_to_global() {
    let builder = builder_after(&program_with_main("INT a; IF (a < 1) INT b; ENDIF"));
    assert_eq!(builder.current_scope().map(|s| s.name.as_str()), Some("GLOBAL"));
}

#[test]
fn test_each_run_starts_fresh() {
    let src = program_with_main("IF (1 < 2) INT x; ENDIF");
    let first = render(&build(&src).unwrap());
    let second = render(&build(&src).unwrap());
    assert_eq!(first, second);
    assert!(first.starts_with("Symbol table BLOCK 2\n"));
}

#[test]
fn test_block_numbers_only_increase() {
    let src = "\
PROGRAM p
BEGIN
  FUNCTION VOID helper()
  BEGIN
    IF (1 < 2)
      INT a;
      IF (1 < 2) INT b; ENDIF
    ENDIF
  END
  FUNCTION VOID main()
  BEGIN
    WHILE (1 < 2) INT c; ENDWHILE
    IF (1 < 2) INT d; ELSE INT e; ENDIF
  END
END";
    let builder = builder_after(src);
    // helper: list 1, IF 2, inner IF 3, inner ELSE 4, outer ELSE 5
    // main: list 6, WHILE 7, IF 8, ELSE 9
    assert_eq!(builder.next_block_number(), 10);
    let numbers: Vec<u32> = builder
        .table()
        .iter()
        .filter_map(|s| s.name.strip_prefix("BLOCK "))
        .map(|n| n.parse().unwrap())
        .collect();
    assert_eq!(numbers, vec![2, 3, 7, 8, 9]);
}

#[test]
fn test_second_main_is_kept_but_not_reported() {
    let table = build(
        "PROGRAM p BEGIN \
         FUNCTION VOID main() BEGIN INT a; END \
         FUNCTION VOID main() BEGIN INT b; END END",
    )
    .unwrap();
    assert_eq!(scope_names(&table), vec!["GLOBAL", "main", "main"]);
    assert_eq!(render(&table), "Symbol table main\nname a type INT\n\n");
}
