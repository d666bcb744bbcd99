pub(crate) const NAME: &str = "TCP demo";
