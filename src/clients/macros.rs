/// Generates `get_<entity>` forwarding to the generic client.
macro_rules! impl_client_get {
    ($client_name:ident, $entity:ty, $error:ty, $entity_name_snake:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](
                    &self,
                    id: <$entity as crate::actor_framework::Entity>::Id,
                ) -> Result<$entity, $error> {
                    tracing::debug!("Sending request");
                    self.inner.get(id).await.map_err(<$error>::from)
                }
            }
        }
    };
}

/// Generates `delete_<entity>` forwarding to the generic client.
macro_rules! impl_client_delete {
    ($client_name:ident, $entity:ty, $error:ty, $entity_name_snake:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<delete_ $entity_name_snake>](
                    &self,
                    id: <$entity as crate::actor_framework::Entity>::Id,
                ) -> Result<(), $error> {
                    tracing::debug!("Sending request");
                    self.inner.delete(id).await.map_err(<$error>::from)
                }
            }
        }
    };
}

macro_rules! impl_client_new {
    ($client_name:ident, $entity:ty) => {
        impl $client_name {
            pub fn new(inner: crate::actor_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }
        }
    };
}

macro_rules! impl_client_shutdown {
    ($client_name:ident, $error:ty) => {
        impl $client_name {
            /// Stops the actor once the requests queued ahead of this one are served.
            #[tracing::instrument(skip(self))]
            pub async fn shutdown(&self) -> Result<(), $error> {
                tracing::debug!("Sending request");
                self.inner.shutdown().await.map_err(<$error>::from)
            }
        }
    };
}

macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $error:ty, $entity_name_snake:ident) => {
        impl_client_new!($client_name, $entity);
        impl_client_shutdown!($client_name, $error);
        impl_client_get!($client_name, $entity, $error, $entity_name_snake);
    };
}
