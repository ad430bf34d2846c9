//! AST dispatch: walk a parsed program in order against one context.
//!
//! Each node maps to a semantic action; every failure becomes an error
//! diagnostic and the walk continues. The grammar guarantees the definition
//! comes first, so no operation can observe an empty registry unless it
//! names the wrong ledger.

use tracing::debug;

use chainscript_lang::{Operation, Program};

use crate::context::ExecutionContext;
use crate::diagnostic::Diagnostic;

/// Execute a whole program against `ctx`, collecting diagnostics in
/// execution order. Semantic errors skip the offending operation (or reject
/// the offending record) and never abort the run.
pub fn execute_program(ctx: &mut ExecutionContext, program: &Program) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let definition = &program.definition;
    match ctx.define_ledger(&definition.name, definition.schema.clone()) {
        Ok(_) => diagnostics.push(Diagnostic::info(format!(
            "defined ledger '{}' ({} attributes) and sealed its genesis block",
            definition.name,
            definition.schema.len()
        ))),
        Err(e) => diagnostics.push(Diagnostic::error(e.to_string())),
    }

    for operation in &program.operations {
        debug!(
            keyword = operation.keyword(),
            target = operation.target(),
            "dispatching operation"
        );
        dispatch(ctx, operation, &mut diagnostics);
    }

    diagnostics
}

fn dispatch(ctx: &mut ExecutionContext, operation: &Operation, diagnostics: &mut Vec<Diagnostic>) {
    match operation {
        Operation::Add { target, fields } => match ctx.add_record(target, fields) {
            Ok(()) => {
                let pending = ctx.ledger(target).map(|l| l.pending_len()).unwrap_or(0);
                diagnostics.push(Diagnostic::info(format!(
                    "staged record for '{target}' ({pending} pending)"
                )));
            }
            Err(errors) => {
                for error in &errors {
                    diagnostics.push(Diagnostic::error(error.to_string()));
                }
                diagnostics.push(Diagnostic::error(format!(
                    "record for '{target}' rejected; pending unchanged"
                )));
            }
        },

        Operation::Mine { target } => match ctx.seal(target) {
            Ok(block) => diagnostics.push(Diagnostic::info(format!(
                "sealed block {} in '{target}' ({} records)",
                block.index,
                block.data.len()
            ))),
            Err(e) => diagnostics.push(Diagnostic::error(e.to_string())),
        },

        // print and view resolve to the identical display action
        Operation::Print { target } | Operation::View { target } => {
            match ctx.render_chain(target) {
                Ok(rendering) => diagnostics.push(Diagnostic::info(rendering)),
                Err(e) => diagnostics.push(Diagnostic::error(e.to_string())),
            }
        }

        Operation::Export { target } => match ctx.export_snapshot(target) {
            Ok(path) => diagnostics.push(Diagnostic::info(format!(
                "exported '{target}' to {}",
                path.display()
            ))),
            Err(e) => diagnostics.push(Diagnostic::error(e.to_string())),
        },

        Operation::Run { target } => match ctx.ledger(target) {
            Some(_) => diagnostics.push(Diagnostic::info(format!(
                "hosting ledger '{target}' (placeholder; no server started)"
            ))),
            None => diagnostics.push(Diagnostic::error(format!(
                "ledger '{target}' is not defined"
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Severity;
    use chainscript_lang::parse_program;

    fn run(source: &str) -> (ExecutionContext, Vec<Diagnostic>) {
        let (program, _) = parse_program(source).unwrap();
        let mut ctx = ExecutionContext::new();
        let diagnostics = execute_program(&mut ctx, &program);
        (ctx, diagnostics)
    }

    fn errors(diagnostics: &[Diagnostic]) -> Vec<&str> {
        diagnostics
            .iter()
            .filter(|d| d.is_error())
            .map(|d| d.message.as_str())
            .collect()
    }

    #[test]
    fn define_add_mine_grows_the_chain() {
        let (ctx, diagnostics) = run(
            r#"block Loans = (borrower: str, lender: str, amount: float)
               add Loans = (borrower: "Al", lender: "Bo", amount: 5.0)
               mine Loans"#,
        );
        assert!(errors(&diagnostics).is_empty(), "{diagnostics:?}");

        let ledger = ctx.ledger("Loans").unwrap();
        assert_eq!(ledger.chain_len(), 2);
        assert_eq!(ledger.chain()[1].data.len(), 1);
        assert_eq!(ledger.pending_len(), 0);
        ledger.verify().unwrap();
    }

    #[test]
    fn type_mismatch_rejects_the_whole_record() {
        let (ctx, diagnostics) = run(
            r#"block Loans = (borrower: str, lender: str, amount: float)
               add Loans = (borrower: "Al", lender: "Bo", amount: "oops")"#,
        );
        let errs = errors(&diagnostics);
        assert!(errs
            .iter()
            .any(|m| m.contains("'amount'") && m.contains("expected float, got str")));
        assert_eq!(ctx.ledger("Loans").unwrap().pending_len(), 0);
    }

    #[test]
    fn unknown_attribute_rejects_the_record() {
        let (ctx, diagnostics) = run(
            r#"block Loans = (borrower: str)
               add Loans = (unknownField: "x")"#,
        );
        let errs = errors(&diagnostics);
        assert!(errs
            .iter()
            .any(|m| m.contains("'unknownField'") && m.contains("not in the schema")));
        assert_eq!(ctx.ledger("Loans").unwrap().pending_len(), 0);
    }

    #[test]
    fn one_add_reports_every_failing_field() {
        let (_, diagnostics) = run(
            r#"block Loans = (borrower: str, amount: float)
               add Loans = (ghost: 1, amount: "oops")"#,
        );
        let errs = errors(&diagnostics);
        // both field errors plus the rejection summary
        assert_eq!(errs.len(), 3);
        assert!(errs[0].contains("'ghost'"));
        assert!(errs[1].contains("'amount'"));
        assert!(errs[2].contains("rejected"));
    }

    #[test]
    fn undefined_ledger_is_reported_and_the_run_continues() {
        let (ctx, diagnostics) = run(
            r#"block Loans = (amount: float)
               print Ghost
               mine Loans"#,
        );
        let errs = errors(&diagnostics);
        assert_eq!(errs, vec!["ledger 'Ghost' is not defined"]);
        // the mine after the failure still executed
        assert_eq!(ctx.ledger("Loans").unwrap().chain_len(), 2);
    }

    #[test]
    fn print_and_view_render_identically() {
        let (_, diagnostics) = run(
            r#"block Loans = (amount: float)
               print Loans
               view Loans"#,
        );
        let infos: Vec<&Diagnostic> = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Info && d.message.contains("LEDGER"))
            .collect();
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].message, infos[1].message);
    }

    #[test]
    fn run_is_a_placeholder_acknowledgment() {
        let (_, diagnostics) = run(
            r#"block Loans = (amount: float)
               run Loans"#,
        );
        assert!(diagnostics
            .iter()
            .any(|d| d.message.contains("hosting ledger 'Loans'")));
        assert!(errors(&diagnostics).is_empty());
    }

    #[test]
    fn mine_with_empty_pending_produces_an_empty_block() {
        let (ctx, diagnostics) = run(
            r#"block Loans = (amount: float)
               mine Loans"#,
        );
        assert!(errors(&diagnostics).is_empty());
        let ledger = ctx.ledger("Loans").unwrap();
        assert_eq!(ledger.chain_len(), 2);
        assert!(ledger.chain()[1].data.is_empty());
    }

    #[test]
    fn export_writes_under_the_context_export_dir() {
        let dir = tempfile::tempdir().unwrap();
        let (program, _) = parse_program(
            r#"block Loans = (amount: float)
               add Loans = (amount: 5.0)
               mine Loans
               export Loans"#,
        )
        .unwrap();
        let mut ctx = ExecutionContext::with_export_dir(dir.path());
        let diagnostics = execute_program(&mut ctx, &program);
        assert!(errors(&diagnostics).is_empty(), "{diagnostics:?}");

        let bytes = std::fs::read(dir.path().join("Loans_blockchain.json")).unwrap();
        let blocks = chainscript_ledger::read_snapshot(&bytes).unwrap();
        assert_eq!(blocks.len(), 2);
        chainscript_ledger::verify_chain(&blocks).unwrap();
    }

    #[test]
    fn fresh_contexts_do_not_share_ledgers() {
        let (first, _) = run("block Loans = (amount: float)\nmine Loans");
        assert!(first.ledger("Loans").is_some());

        // a second run starts from a clean slate
        let (program, _) = parse_program("block Other = (x: int)\nmine Other").unwrap();
        let mut ctx = ExecutionContext::new();
        execute_program(&mut ctx, &program);
        assert!(ctx.ledger("Loans").is_none());
        assert!(ctx.ledger("Other").is_some());
    }

    #[test]
    fn redefining_a_ledger_in_a_shared_context_keeps_the_first() {
        // one grammar rule allows only one definition per program, so the
        // duplicate check bites when a host reuses a context across programs
        let mut ctx = ExecutionContext::new();
        let (first, _) = parse_program(
            r#"block Loans = (amount: float)
               add Loans = (amount: 5.0)"#,
        )
        .unwrap();
        execute_program(&mut ctx, &first);

        let (second, _) = parse_program("block Loans = (other: int)\nmine Loans").unwrap();
        let diagnostics = execute_program(&mut ctx, &second);

        assert!(errors(&diagnostics)
            .iter()
            .any(|m| m.contains("already defined")));
        // the original schema and its pending record survived; the mine
        // after the duplicate definition still ran against it
        let ledger = ctx.ledger("Loans").unwrap();
        assert_eq!(ledger.schema().tag_of("amount"), Some(chainscript_types::TypeTag::Float));
        assert_eq!(ledger.chain_len(), 2);
        assert_eq!(ledger.chain()[1].data.len(), 1);
    }

    #[test]
    fn diagnostics_follow_execution_order() {
        let (_, diagnostics) = run(
            r#"block Loans = (amount: float)
               add Loans = (amount: 1.5)
               mine Loans"#,
        );
        assert!(diagnostics[0].message.contains("defined ledger 'Loans'"));
        assert!(diagnostics[1].message.contains("staged record"));
        assert!(diagnostics[2].message.contains("sealed block 2"));
    }
}
