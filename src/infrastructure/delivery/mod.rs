mod http_deliverer;

pub use http_deliverer::HttpWebhookDeliverer;
