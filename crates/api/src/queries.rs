//! GraphQL documents for the Hashrate Index API, keyed by api method.

/// One remote call: the GraphQL document plus its variables in positional
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryDocument {
    pub api_method: &'static str,
    pub operation_name: &'static str,
    /// Variable names matched positionally against the call arguments
    pub variables: &'static [&'static str],
    pub document: &'static str,
}

pub const QUERIES: &[QueryDocument] = &[
    QueryDocument {
        api_method: "get_bitcoin_overview",
        operation_name: "getBitcoinOverview",
        variables: &[],
        document: r#"query getBitcoinOverview {
  bitcoinOverviews {
    nodes {
      timestamp
      hashpriceUsd
      networkHashrate7D
      networkDiff
      estDiffAdj
      coinbaseRewards24H
      feesBlocks24H
      marketcap
      nextHalvingCount
      nextHalvingDate
    }
  }
}"#,
    },
    QueryDocument {
        api_method: "get_hashprice",
        operation_name: "getHashprice",
        variables: &["inputInterval", "currency"],
        document: r#"query getHashprice($inputInterval: ChartsInterval!, $currency: String!) {
  getHashprice(inputInterval: $inputInterval, currency: $currency, first: 1000) {
    nodes {
      timestamp
      price
    }
  }
}"#,
    },
    QueryDocument {
        api_method: "get_network_hashrate",
        operation_name: "getNetworkHashrate",
        variables: &["inputInterval"],
        document: r#"query getNetworkHashrate($inputInterval: ChartsInterval!) {
  getNetworkHashrate(inputInterval: $inputInterval, first: 1000) {
    nodes {
      timestamp
      networkHashrate
    }
  }
}"#,
    },
    QueryDocument {
        api_method: "get_network_difficulty",
        operation_name: "getNetworkDifficulty",
        variables: &["inputInterval"],
        document: r#"query getNetworkDifficulty($inputInterval: ChartsInterval!) {
  getNetworkDifficulty(inputInterval: $inputInterval, first: 1000) {
    nodes {
      timestamp
      difficulty
    }
  }
}"#,
    },
    QueryDocument {
        api_method: "get_ohlc_prices",
        operation_name: "getOhlcPrices",
        variables: &["inputInterval"],
        document: r#"query getOhlcPrices($inputInterval: ChartsInterval!) {
  getOhlcPrices(inputInterval: $inputInterval, first: 1000) {
    nodes {
      timestamp
      open
      high
      low
      close
      volume
    }
  }
}"#,
    },
    QueryDocument {
        api_method: "get_asic_price_index",
        operation_name: "getChartBySlug",
        variables: &["inputInterval", "currency"],
        document: r#"query getChartBySlug($inputInterval: ChartsInterval!, $currency: String!) {
  getChartBySlug(slug: "asic-price-index", inputInterval: $inputInterval, currency: $currency) {
    data
  }
}"#,
    },
];

pub fn query_for(api_method: &str) -> Option<&'static QueryDocument> {
    QUERIES.iter().find(|query| query.api_method == api_method)
}
