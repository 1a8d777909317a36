//! Background fetching.
//!
//! The network call runs on a tokio task; its outcome comes back to the UI
//! loop over an unbounded channel, tagged with the [`RefreshTicket`] it was
//! started for.  The UI loop is the only place that applies results to the
//! view-model.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::GatewayError;
use crate::record::Record;
use crate::requirement::Requirement;
use crate::view_model::RefreshTicket;

/// Message sent from a fetch task to the UI loop.
pub struct FetchMsg<R> {
    pub ticket: RefreshTicket,
    pub result: Result<Vec<R>, GatewayError>,
}

pub type FetchSender<R> = mpsc::UnboundedSender<FetchMsg<R>>;
pub type FetchReceiver<R> = mpsc::UnboundedReceiver<FetchMsg<R>>;

pub fn channel<R>() -> (FetchSender<R>, FetchReceiver<R>) {
    mpsc::unbounded_channel()
}

/// Run one fetch on a task and report back on `tx`.
///
/// If the receiver is gone the UI has exited and the result is dropped.
pub fn spawn<R: Record>(
    requirement: Arc<dyn Requirement<R>>,
    ticket: RefreshTicket,
    tx: FetchSender<R>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = requirement.fetch_all().await;
        if tx.send(FetchMsg { ticket, result }).is_err() {
            tracing::debug!("fetch result dropped, UI has exited");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DataItem;
    use crate::toast::ToastManager;
    use crate::view_model::ViewModel;
    use async_trait::async_trait;

    struct OneItem;

    #[async_trait]
    impl Requirement<DataItem> for OneItem {
        async fn fetch_all(&self) -> Result<Vec<DataItem>, GatewayError> {
            Ok(vec![DataItem {
                id: 1,
                name: "only".into(),
                description: "one".into(),
            }])
        }
    }

    #[tokio::test]
    async fn result_arrives_with_its_ticket() {
        let mut vm = ViewModel::<DataItem>::new(Arc::new(OneItem), ToastManager::default());
        let (tx, mut rx) = channel();

        let ticket = vm.begin_refresh();
        spawn(vm.requirement(), ticket, tx).await.unwrap();

        let msg = rx.recv().await.expect("fetch message");
        assert_eq!(msg.ticket, ticket);
        assert!(vm.complete_refresh(msg.ticket, msg.result));
        assert_eq!(vm.state().records.len(), 1);
    }

    #[tokio::test]
    async fn closed_receiver_does_not_panic() {
        let (tx, rx) = channel::<DataItem>();
        drop(rx);

        let mut vm = ViewModel::<DataItem>::new(Arc::new(OneItem), ToastManager::default());
        let ticket = vm.begin_refresh();

        spawn(vm.requirement(), ticket, tx).await.unwrap();
    }
}
