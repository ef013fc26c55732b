use releve_core::model::Statement;

const DATE_FORMAT: &str = "%d/%m/%Y";

pub fn print(statement: &Statement) {
    if statement.transactions.is_empty() {
        println!("No transaction found.");
        return;
    }

    let max_libelle = statement
        .transactions
        .iter()
        .map(|t| t.libelle.chars().count())
        .max()
        .unwrap_or(10)
        .clamp(10, 60);

    println!(
        "  {:<10}  {:<10}  {:<width$}  {:>14}  {:>14}  {:>14}",
        "Date",
        "Valeur",
        "Libellé",
        "Débit",
        "Crédit",
        "Solde",
        width = max_libelle
    );

    for tx in &statement.transactions {
        let valeur = tx
            .date_valeur
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default();
        let libelle: String = tx.libelle.chars().take(max_libelle).collect();
        println!(
            "  {:<10}  {:<10}  {:<width$}  {:>14}  {:>14}  {:>14}",
            tx.date.format(DATE_FORMAT),
            valeur,
            libelle,
            tx.debit,
            tx.credit,
            tx.solde,
            width = max_libelle
        );
    }

    println!();
    println!("  Transactions: {}", statement.transactions.len());
    if statement.dropped > 0 {
        println!("  Dropped (no valid date): {}", statement.dropped);
    }
    println!("  Total debit:  {}", statement.total_debit());
    println!("  Total credit: {}", statement.total_credit());
    if let Some(balance) = statement.preceding_balance {
        println!("  Preceding balance: {}", balance);
    }
}
