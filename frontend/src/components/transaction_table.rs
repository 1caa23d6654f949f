use shared::RecentTransaction;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TransactionTableProps {
    pub transactions: Vec<RecentTransaction>,
}

#[function_component(TransactionTable)]
pub fn transaction_table(props: &TransactionTableProps) -> Html {
    html! {
        <section class="card transactions-section">
            <h3 class="card-title">{"Recent Transactions"}</h3>

            if props.transactions.is_empty() {
                <p class="text-center text-muted">{"No transactions yet"}</p>
            } else {
                <div class="table-container">
                    <table class="transactions-table">
                        <thead>
                            <tr>
                                <th>{"Date"}</th>
                                <th>{"Description"}</th>
                                <th>{"Category"}</th>
                                <th>{"Account"}</th>
                                <th>{"Amount"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {for props.transactions.iter().map(|transaction| {
                                let category =
                                    transaction.category_name.clone().unwrap_or_default();
                                let account =
                                    transaction.account_name.clone().unwrap_or_default();
                                let amount_class = if transaction.is_income() {
                                    "amount positive"
                                } else {
                                    "amount negative"
                                };

                                html! {
                                    <tr>
                                        <td class="date">{transaction.display_date()}</td>
                                        <td class="description">
                                            {transaction.title()}
                                            if transaction.recurring {
                                                <span class="badge">{"Recurring"}</span>
                                            }
                                        </td>
                                        <td>{category}</td>
                                        <td>{account}</td>
                                        <td class={amount_class}>{transaction.signed_amount()}</td>
                                    </tr>
                                }
                            })}
                        </tbody>
                    </table>
                </div>
            }
        </section>
    }
}
