//! Lints a query given on the command line, or a built-in sample, and prints
//! the findings.
//!
//! ```bash
//! cargo run --example lint_demo -- "SELECT T2.A FROM A AS T1 LEFT JOIN B AS T2 ON T1.X = T2.X"
//! ```

use sdbl_lint::lint;

const SAMPLE: &str = "SELECT T1.Goods, T2.Price, ISNULL(T2.Stock, 0) AS Stock
FROM Catalog.Goods AS T1
    LEFT JOIN InformationRegister.Prices AS T2
    ON T1.Ref = T2.Goods
WHERE T2.Price > 100";

fn main() {
    let source = std::env::args()
        .nth(1)
        .unwrap_or_else(|| SAMPLE.to_string());

    let outcome = lint(&source);
    let findings = outcome.diagnostics().len();
    let reports = outcome.into_reports(&source);

    if reports.is_empty() {
        println!("no problems found");
        return;
    }
    for report in reports {
        eprintln!("{report:?}");
    }
    println!("{findings} outer join(s) with unguarded fields");
}
