pub mod config_client;
pub mod config_socket;
pub mod exchange_outcome;
pub mod socket_optimizer;
pub mod tcp_client;
mod tcp_client_connect;
pub mod tcp_client_connection_stream;
mod tcp_client_fields;
mod tcp_client_receive;
mod tcp_client_send;
mod tcp_client_shutdown;
pub mod tcp_client_state;
pub mod tcp_connection_stream;
pub mod tcp_connector;
#[cfg(test)]
mod test_support;
