//! # Terms Subcommand
//!
//! Prints the trade term table: each rule with its risk transfer and cost
//! allocation points.

use clap::Args;

use tradedoc_terms::TradeTerm;

/// Arguments for the `terms` subcommand.
#[derive(Args, Debug)]
pub struct TermsArgs {}

/// Render the trade term table, one line per rule.
pub fn render() -> String {
    let mut out = String::from("term  risk_transfer    cost_allocation\n");
    for term in TradeTerm::all_terms() {
        out.push_str(&format!(
            "{:<5} {:<16} {}\n",
            term.as_str(),
            term.risk_transfer().as_str(),
            term.cost_allocation().as_str(),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_lists_every_term() {
        let table = render();
        for term in TradeTerm::all_terms() {
            assert!(table.contains(term.as_str()));
        }
    }
}
