//! GraphQL documents sent to the Storefront API.

macro_rules! product_fragment {
    () => {
        r"
fragment ProductFields on Product {
  id
  handle
  title
  description
  availableForSale
  productType
  tags
  featuredImage { url altText width height }
  images(first: 20) { edges { node { url altText width height } } }
  priceRange {
    minVariantPrice { amount currencyCode }
    maxVariantPrice { amount currencyCode }
  }
  compareAtPriceRange {
    minVariantPrice { amount currencyCode }
    maxVariantPrice { amount currencyCode }
  }
  collections(first: 10) { edges { node { handle title } } }
  variants(first: 100) {
    edges {
      node {
        id
        title
        availableForSale
        price { amount currencyCode }
        compareAtPrice { amount currencyCode }
        selectedOptions { name value }
        image { url altText width height }
      }
    }
  }
}
"
    };
}

macro_rules! cart_fragment {
    () => {
        r"
fragment CartFields on Cart {
  id
  checkoutUrl
  totalQuantity
  cost {
    subtotalAmount { amount currencyCode }
    totalAmount { amount currencyCode }
    totalTaxAmount { amount currencyCode }
  }
  discountCodes { code applicable }
  lines(first: 100) {
    edges {
      node {
        id
        quantity
        cost {
          amountPerQuantity { amount currencyCode }
          compareAtAmountPerQuantity { amount currencyCode }
          totalAmount { amount currencyCode }
        }
        merchandise {
          ... on ProductVariant {
            id
            title
            price { amount currencyCode }
            compareAtPrice { amount currencyCode }
            selectedOptions { name value }
            image { url altText width height }
            product { id title handle }
          }
        }
      }
    }
  }
}
"
    };
}

macro_rules! cart_mutation_payload {
    () => {
        "cart { ...CartFields } userErrors { field message code }"
    };
}

pub const PRODUCTS: &str = concat!(
    "query Products($first: Int!, $query: String) {
  products(first: $first, query: $query) { edges { node { ...ProductFields } } }
}",
    product_fragment!()
);

pub const PRODUCT_BY_HANDLE: &str = concat!(
    "query ProductByHandle($handle: String!) {
  product(handle: $handle) { ...ProductFields }
}",
    product_fragment!()
);

pub const COLLECTIONS: &str = "query Collections($first: Int!) {
  collections(first: $first) {
    edges { node { id handle title description image { url altText width height } } }
  }
}";

pub const COLLECTION_PRODUCTS: &str = concat!(
    "query CollectionProducts($handle: String!, $first: Int!) {
  collection(handle: $handle) {
    id
    handle
    title
    description
    products(first: $first) { edges { node { ...ProductFields } } }
  }
}",
    product_fragment!()
);

pub const SEARCH_PRODUCTS: &str = concat!(
    "query SearchProducts($query: String!, $first: Int!) {
  search(query: $query, first: $first, types: [PRODUCT]) {
    edges { node { ... on Product { ...ProductFields } } }
  }
}",
    product_fragment!()
);

pub const MENU: &str = "query Menu($handle: String!) {
  menu(handle: $handle) {
    handle
    title
    items { title url items { title url items { title url } } }
  }
}";

pub const PAGE: &str = "query Page($handle: String!) {
  page(handle: $handle) {
    id
    handle
    title
    body
    bodySummary
    seo { title description }
  }
}";

pub const GET_CART: &str = concat!(
    "query GetCart($cartId: ID!) {
  cart(id: $cartId) { ...CartFields }
}",
    cart_fragment!()
);

pub const CREATE_CART: &str = concat!(
    "mutation CreateCart($lines: [CartLineInput!]) {
  cartCreate(input: { lines: $lines }) { ",
    cart_mutation_payload!(),
    " }
}",
    cart_fragment!()
);

pub const ADD_LINES: &str = concat!(
    "mutation AddLines($cartId: ID!, $lines: [CartLineInput!]!) {
  cartLinesAdd(cartId: $cartId, lines: $lines) { ",
    cart_mutation_payload!(),
    " }
}",
    cart_fragment!()
);

pub const UPDATE_LINES: &str = concat!(
    "mutation UpdateLines($cartId: ID!, $lines: [CartLineUpdateInput!]!) {
  cartLinesUpdate(cartId: $cartId, lines: $lines) { ",
    cart_mutation_payload!(),
    " }
}",
    cart_fragment!()
);

pub const REMOVE_LINES: &str = concat!(
    "mutation RemoveLines($cartId: ID!, $lineIds: [ID!]!) {
  cartLinesRemove(cartId: $cartId, lineIds: $lineIds) { ",
    cart_mutation_payload!(),
    " }
}",
    cart_fragment!()
);

pub const UPDATE_DISCOUNT_CODES: &str = concat!(
    "mutation UpdateDiscountCodes($cartId: ID!, $discountCodes: [String!]!) {
  cartDiscountCodesUpdate(cartId: $cartId, discountCodes: $discountCodes) { ",
    cart_mutation_payload!(),
    " }
}",
    cart_fragment!()
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_queries_include_fragment_definition() {
        for query in [PRODUCTS, PRODUCT_BY_HANDLE, COLLECTION_PRODUCTS, SEARCH_PRODUCTS] {
            assert!(query.contains("fragment ProductFields on Product"));
        }
    }

    #[test]
    fn cart_mutations_request_user_errors() {
        for query in [CREATE_CART, ADD_LINES, UPDATE_LINES, REMOVE_LINES, UPDATE_DISCOUNT_CODES] {
            assert!(query.contains("userErrors { field message code }"));
            assert!(query.contains("fragment CartFields on Cart"));
        }
    }
}
