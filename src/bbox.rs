use nalgebra as na;
use serde_derive::{Deserialize, Serialize};
use std::marker::PhantomData;

pub trait BBoxFormat: std::fmt::Debug + Copy + PartialEq {}

/// Left-top-right-bottom format, contains left top and right bottom corners
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ltrb;
impl BBoxFormat for Ltrb {}

/// Integer pixel box, serialized as a plain `[i32; 4]`
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
#[serde(transparent, bound = "")]
pub struct BBox<F: BBoxFormat>([i32; 4], #[serde(skip)] PhantomData<F>);

impl<F: BBoxFormat> From<BBox<F>> for [i32; 4] {
    fn from(bbox: BBox<F>) -> Self {
        bbox.0
    }
}

impl<F: BBoxFormat> BBox<F> {
    #[inline]
    pub fn as_slice(&self) -> &[i32; 4] {
        &self.0
    }
}

impl BBox<Ltrb> {
    #[inline]
    pub fn ltrb(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        BBox([x1, y1, x2, y2], PhantomData)
    }

    #[inline(always)]
    pub fn left(&self) -> i32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn top(&self) -> i32 {
        self.0[1]
    }

    #[inline(always)]
    pub fn right(&self) -> i32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn bottom(&self) -> i32 {
        self.0[3]
    }

    /// Area in square pixels, negative extents count as zero
    #[inline]
    pub fn area(&self) -> i64 {
        let w = (self.right() as i64 - self.left() as i64).max(0);
        let h = (self.bottom() as i64 - self.top() as i64).max(0);

        w * h
    }

    /// Integer center, rounded toward negative infinity
    #[inline]
    pub fn center(&self) -> na::Point2<i32> {
        // the floored midpoint of two i32 values always fits back into i32
        let mid = |a: i32, b: i32| (a as i64 + b as i64).div_euclid(2) as i32;

        na::Point2::new(mid(self.left(), self.right()), mid(self.top(), self.bottom()))
    }
}
