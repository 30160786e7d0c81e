use pretty_assertions::assert_eq;
use schemastate::advisor::{Advice, AdviceCode, IndexKeyNumberLimitAdvisor, Status};
use schemastate::config::AdvisorSettings;

fn contents(advice: &[Advice]) -> Vec<&str> {
    advice.iter().map(|a| a.content.as_str()).collect()
}

#[test]
fn test_create_table_constraints() {
    let sql = "CREATE TABLE orders (
        a INT,
        b INT,
        c INT,
        PRIMARY KEY (a),
        KEY idx_abc (a, b, c),
        KEY idx_ab (a, b),
        CONSTRAINT fk_abc FOREIGN KEY (a, b, c) REFERENCES parent (a, b, c)
    )";
    let advice = IndexKeyNumberLimitAdvisor::new(2, Status::Warning).check(sql);

    assert_eq!(
        contents(&advice),
        vec![
            "The number of index `idx_abc` in table `orders` should be not greater than 2",
            "The number of index `fk_abc` in table `orders` should be not greater than 2",
        ]
    );
    assert!(advice.iter().all(|a| a.status == Status::Warning
        && a.code == AdviceCode::IndexKeyNumberExceedsLimit
        && a.title == "index.key-number-limit"));
    let lines: Vec<usize> = advice.iter().map(|a| a.line).collect();
    assert_eq!(lines, vec![6, 8]);
}

#[test]
fn test_constraint_line_counts_from_start_of_input() {
    let sql = "CREATE TABLE narrow (a INT);\n\nCREATE TABLE wide (\n  a INT,\n  b INT,\n  c INT,\n  KEY idx_abc (a, b, c)\n);";
    let advice = IndexKeyNumberLimitAdvisor::new(2, Status::Warning).check(sql);

    assert_eq!(advice.len(), 1);
    assert_eq!(
        advice[0].content,
        "The number of index `idx_abc` in table `wide` should be not greater than 2"
    );
    assert_eq!(advice[0].line, 7);
}

#[test]
fn test_alter_table_reports_statement_line() {
    let sql = "CREATE TABLE t (a INT);\nALTER TABLE t\n  ADD CONSTRAINT uk_abc UNIQUE KEY (a, b, c);";
    let advice = IndexKeyNumberLimitAdvisor::new(2, Status::Warning).check(sql);

    assert_eq!(advice.len(), 1);
    assert_eq!(advice[0].line, 2);
}

#[test]
fn test_alter_table_add_constraint() {
    let sql = "ALTER TABLE `shop`.`orders` ADD CONSTRAINT uk_abc UNIQUE KEY (a, b, c)";
    let advice = IndexKeyNumberLimitAdvisor::new(2, Status::Error).check(sql);

    assert_eq!(advice.len(), 1);
    assert_eq!(advice[0].status, Status::Error);
    assert_eq!(
        advice[0].content,
        "The number of index `uk_abc` in table `orders` should be not greater than 2"
    );
}

#[test]
fn test_line_of_offending_statement() {
    let sql = "CREATE TABLE t1 (a INT);\n\n\nCREATE INDEX idx_wide ON t1 (a, b, c);\n";
    let advice = IndexKeyNumberLimitAdvisor::new(2, Status::Warning).check(sql);

    assert_eq!(advice.len(), 1);
    assert_eq!(advice[0].line, 4);
}

#[test]
fn test_clean_input_yields_ok() {
    let sql = "CREATE TABLE t (a INT, b INT, KEY idx_ab (a, b)); CREATE INDEX idx_a ON t (a);";
    let advice = IndexKeyNumberLimitAdvisor::new(2, Status::Warning).check(sql);
    assert_eq!(advice, vec![Advice::ok()]);
}

#[test]
fn test_syntax_error() {
    let advisor = IndexKeyNumberLimitAdvisor::new(2, Status::Warning);
    let advice = advisor.check("CREATE TABLEE t (a INT)");

    assert_eq!(advice.len(), 1);
    assert_eq!(advice[0].status, Status::Error);
    assert_eq!(advice[0].code, AdviceCode::StatementSyntaxError);
    assert!(!advice[0].content.is_empty());
}

#[test]
fn test_from_settings() {
    let settings = AdvisorSettings {
        max_index_keys: 1,
        level: Status::Error,
    };
    let advisor = IndexKeyNumberLimitAdvisor::from_settings(&settings);
    let advice = advisor.check("CREATE INDEX idx_ab ON t (a, b)");

    assert_eq!(advice[0].status, Status::Error);
    assert_eq!(
        advice[0].content,
        "The number of index `idx_ab` in table `t` should be not greater than 1"
    );
}

#[test]
fn test_default_settings_allow_five_keys() {
    let advisor = IndexKeyNumberLimitAdvisor::from_settings(&AdvisorSettings::default());

    let five = advisor.check("CREATE INDEX idx5 ON t (a, b, c, d, e)");
    assert_eq!(five, vec![Advice::ok()]);

    let six = advisor.check("CREATE INDEX idx6 ON t (a, b, c, d, e, f)");
    assert_eq!(six[0].code, AdviceCode::IndexKeyNumberExceedsLimit);
    assert_eq!(six[0].status, Status::Warning);
}
