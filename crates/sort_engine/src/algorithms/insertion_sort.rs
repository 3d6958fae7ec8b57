use crate::StrictOrder;

use super::common;

pub fn sort<T, O: StrictOrder<T>>(data: &mut [T], order: &O) {
    common::insertion_sort(data, order);
}
