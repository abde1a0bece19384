use std::sync::Arc;

use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use crate::{
    dto::products::{OperationOutcome, ProductInput},
    models::Product,
    services::product_service::ProductGateway,
};

use super::{BridgeError, BridgeReply, BridgeRequest, Delivery, ProductApi, WindowHost};

enum Envelope {
    Send(BridgeRequest),
    Invoke(BridgeRequest, oneshot::Sender<BridgeReply>),
}

/// Privileged side of the bridge: maps each request onto the gateway.
pub struct Bridge {
    gateway: ProductGateway,
    window: Arc<dyn WindowHost>,
}

impl Bridge {
    pub fn new(gateway: ProductGateway, window: Arc<dyn WindowHost>) -> Self {
        Self { gateway, window }
    }

    pub async fn handle(&self, request: BridgeRequest) -> BridgeReply {
        match request {
            BridgeRequest::AddProduct {
                nome,
                quantidade,
                preco,
            } => {
                let input = ProductInput {
                    nome,
                    quantidade,
                    preco,
                };
                if let Err(err) = self.gateway.insert(&input).await {
                    tracing::error!(error = %err, nome = %input.nome, "failed to insert product");
                }
                BridgeReply::Accepted
            }
            BridgeRequest::GetProduct => BridgeReply::Products(self.gateway.list().await),
            BridgeRequest::DeleteProduct { id } => {
                BridgeReply::Outcome(self.gateway.delete_by_id(id).await)
            }
            BridgeRequest::UpdateProduct { id, product } => {
                BridgeReply::Outcome(self.gateway.update_by_id(id, &product).await)
            }
            BridgeRequest::FocusWindow => {
                self.window.focus();
                BridgeReply::Accepted
            }
        }
    }
}

/// Start the dispatcher task. Requests are handled one at a time in the
/// order they were queued; the task ends once every handle is dropped.
pub fn spawn(bridge: Bridge) -> (BridgeHandle, JoinHandle<()>) {
    let (sender, mut receiver) = mpsc::unbounded_channel::<Envelope>();

    let task = tokio::spawn(async move {
        while let Some(envelope) = receiver.recv().await {
            match envelope {
                Envelope::Send(request) => {
                    tracing::debug!(op = request.name(), "bridge send");
                    bridge.handle(request).await;
                }
                Envelope::Invoke(request, reply) => {
                    let op = request.name();
                    tracing::debug!(op, "bridge invoke");
                    if reply.send(bridge.handle(request).await).is_err() {
                        tracing::warn!(op, "caller went away before the reply");
                    }
                }
            }
        }
        tracing::info!("bridge dispatcher stopped");
    });

    (BridgeHandle { sender }, task)
}

/// Caller side of the bridge.
#[derive(Clone)]
pub struct BridgeHandle {
    sender: mpsc::UnboundedSender<Envelope>,
}

impl std::fmt::Debug for BridgeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeHandle")
            .field("closed", &self.sender.is_closed())
            .finish()
    }
}

impl BridgeHandle {
    /// Queue a request without waiting for its result.
    pub fn send(&self, request: BridgeRequest) -> Result<(), BridgeError> {
        self.sender
            .send(Envelope::Send(request))
            .map_err(|_| BridgeError::Disconnected)
    }

    /// Queue a request and wait for the reply.
    pub async fn invoke(&self, request: BridgeRequest) -> Result<BridgeReply, BridgeError> {
        let op = request.name();
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(Envelope::Invoke(request, reply_tx))
            .map_err(|_| BridgeError::Disconnected)?;
        reply_rx.await.map_err(|_| BridgeError::Dropped(op))
    }

    /// Route a request by its delivery kind. Fire-and-forget requests reply
    /// with [`BridgeReply::Accepted`] as soon as they are queued.
    pub async fn dispatch(&self, request: BridgeRequest) -> Result<BridgeReply, BridgeError> {
        match request.delivery() {
            Delivery::FireAndForget => {
                self.send(request)?;
                Ok(BridgeReply::Accepted)
            }
            Delivery::RequestResponse => self.invoke(request).await,
        }
    }

    async fn invoke_outcome(&self, request: BridgeRequest) -> Result<OperationOutcome, BridgeError> {
        let op = request.name();
        match self.invoke(request).await? {
            BridgeReply::Outcome(outcome) => Ok(outcome),
            _ => Err(BridgeError::UnexpectedReply(op)),
        }
    }
}

impl ProductApi for BridgeHandle {
    async fn add_product(&self, input: ProductInput) -> Result<(), BridgeError> {
        self.send(BridgeRequest::AddProduct {
            nome: input.nome,
            quantidade: input.quantidade,
            preco: input.preco,
        })
    }

    async fn get_product(&self) -> Result<Vec<Product>, BridgeError> {
        match self.invoke(BridgeRequest::GetProduct).await? {
            BridgeReply::Products(products) => Ok(products),
            _ => Err(BridgeError::UnexpectedReply("getProduct")),
        }
    }

    async fn delete_product(&self, id: i32) -> Result<OperationOutcome, BridgeError> {
        self.invoke_outcome(BridgeRequest::DeleteProduct { id }).await
    }

    async fn update_product(
        &self,
        id: i32,
        input: ProductInput,
    ) -> Result<OperationOutcome, BridgeError> {
        self.invoke_outcome(BridgeRequest::UpdateProduct { id, product: input })
            .await
    }

    async fn focus_window(&self) -> Result<(), BridgeError> {
        self.send(BridgeRequest::FocusWindow)
    }
}
