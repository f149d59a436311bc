//! GraphQL documents for the catalog mutations.
//!
//! Each document is paired with the name of its top-level response field,
//! which the client uses to locate the mutation payload.

pub(super) struct Operation {
    pub field: &'static str,
    pub document: &'static str,
}

pub(super) const CHANNEL_CREATE: Operation = Operation {
    field: "channelCreate",
    document: "mutation ChannelCreate($input: ChannelCreateInput!) {
  channelCreate(input: $input) { channel { id } errors { field message } }
}",
};

pub(super) const WAREHOUSE_CREATE: Operation = Operation {
    field: "createWarehouse",
    document: "mutation WarehouseCreate($input: WarehouseCreateInput!) {
  createWarehouse(input: $input) { warehouse { id } errors { field message } }
}",
};

pub(super) const SHIPPING_ZONE_CREATE: Operation = Operation {
    field: "shippingZoneCreate",
    document: "mutation ShippingZoneCreate($input: ShippingZoneCreateInput!) {
  shippingZoneCreate(input: $input) { shippingZone { id } errors { field message } }
}",
};

pub(super) const ATTRIBUTE_CREATE: Operation = Operation {
    field: "attributeCreate",
    document: "mutation AttributeCreate($input: AttributeCreateInput!) {
  attributeCreate(input: $input) { attribute { id } errors { field message } }
}",
};

pub(super) const PRODUCT_TYPE_CREATE: Operation = Operation {
    field: "productTypeCreate",
    document: "mutation ProductTypeCreate($input: ProductTypeInput!) {
  productTypeCreate(input: $input) { productType { id } errors { field message } }
}",
};

pub(super) const CATEGORY_CREATE: Operation = Operation {
    field: "categoryCreate",
    document: "mutation CategoryCreate($input: CategoryInput!) {
  categoryCreate(input: $input) { category { id } errors { field message } }
}",
};

pub(super) const PRODUCT_CREATE: Operation = Operation {
    field: "productCreate",
    document: "mutation ProductCreate($input: ProductCreateInput!) {
  productCreate(input: $input) { product { id } errors { field message } }
}",
};

pub(super) const UPDATE_METADATA: Operation = Operation {
    field: "updateMetadata",
    document: "mutation UpdateMetadata($id: ID!, $input: [MetadataInput!]!) {
  updateMetadata(id: $id, input: $input) { item { metadata { key } } errors { field message } }
}",
};

pub(super) const PRODUCT_CHANNEL_LISTING_UPDATE: Operation = Operation {
    field: "productChannelListingUpdate",
    document: "mutation ProductChannelListingUpdate($id: ID!, $input: ProductChannelListingUpdateInput!) {
  productChannelListingUpdate(id: $id, input: $input) { product { id } errors { field message } }
}",
};

pub(super) const PRODUCT_VARIANT_CREATE: Operation = Operation {
    field: "productVariantCreate",
    document: "mutation ProductVariantCreate($input: ProductVariantCreateInput!) {
  productVariantCreate(input: $input) { productVariant { id } errors { field message } }
}",
};

pub(super) const PRODUCT_VARIANT_CHANNEL_LISTING_UPDATE: Operation = Operation {
    field: "productVariantChannelListingUpdate",
    document: "mutation ProductVariantChannelListingUpdate($id: ID!, $input: [ProductVariantChannelListingAddInput!]!) {
  productVariantChannelListingUpdate(id: $id, input: $input) { variant { id } errors { field message } }
}",
};

pub(super) const PRODUCT_MEDIA_CREATE: Operation = Operation {
    field: "productMediaCreate",
    document: "mutation ProductMediaCreate($product: ID!, $image: Upload!) {
  productMediaCreate(input: { product: $product, image: $image }) { media { id } errors { field message } }
}",
};

pub(super) const CHANNEL_ACTIVATE: Operation = Operation {
    field: "channelActivate",
    document: "mutation ChannelActivate($id: ID!) {
  channelActivate(id: $id) { channel { id isActive } errors { field message } }
}",
};
