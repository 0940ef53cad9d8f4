//! Common test utilities

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};

use finance_dlq::broker::{Consumer, DeadLetterPublisher, Topology};
use finance_dlq::domain::{RecordExpense, RecordIncome};
use finance_dlq::handlers::ProcessingHandler;
use finance_dlq::repository::InMemoryRecordStore;
use finance_dlq::Config;

/// A fully wired pipeline with both consumers running and the
/// dead-letter receivers kept open for assertions.
pub struct Pipeline {
    pub expense_queue: finance_dlq::broker::QueueSender,
    pub income_queue: finance_dlq::broker::QueueSender,
    pub expense_store: InMemoryRecordStore,
    pub income_store: InMemoryRecordStore,
    pub expense_dlq: mpsc::Receiver<String>,
    pub income_dlq: mpsc::Receiver<String>,
}

/// Provision queues, spawn one consumer per kind and hand back the
/// sending/observing ends.
pub fn spawn_pipeline() -> Pipeline {
    let topology = Topology::provision(&Config::for_tests());
    let dead_letters = DeadLetterPublisher::new(
        topology.expense.dead_letter.sender.clone(),
        topology.income.dead_letter.sender.clone(),
    );

    let expense_store = InMemoryRecordStore::new();
    let income_store = InMemoryRecordStore::new();

    tokio::spawn(
        Consumer::<RecordExpense>::new(
            ProcessingHandler::new(expense_store.clone()),
            dead_letters.clone(),
        )
        .run(topology.expense.inbound.receiver),
    );
    tokio::spawn(
        Consumer::<RecordIncome>::new(
            ProcessingHandler::new(income_store.clone()),
            dead_letters,
        )
        .run(topology.income.inbound.receiver),
    );

    Pipeline {
        expense_queue: topology.expense.inbound.sender,
        income_queue: topology.income.inbound.sender,
        expense_store,
        income_store,
        expense_dlq: topology.expense.dead_letter.receiver,
        income_dlq: topology.income.dead_letter.receiver,
    }
}

/// Wait until the store holds a record under `id`, panicking after two
/// seconds.
pub async fn await_record(store: &InMemoryRecordStore, id: &str) -> finance_dlq::FinancialRecord {
    timeout(Duration::from_secs(2), async {
        loop {
            if let Some(record) = store.find_by_id(id).await {
                return record;
            }
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("record {id} never persisted"))
}

/// Receive the next dead-letter payload, panicking after two seconds.
pub async fn await_dead_letter(dlq: &mut mpsc::Receiver<String>) -> String {
    timeout(Duration::from_secs(2), dlq.recv())
        .await
        .expect("no dead-letter message arrived")
        .expect("dead-letter queue closed")
}
