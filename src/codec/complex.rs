//! complex64/complex128 codecs: real part then imaginary part, each via
//! the matching float codec. Ordering is lexicographic on `(re, im)`.

use std::io::Read;
use std::io::Write;

use crate::codec::float::Float32Codec;
use crate::codec::float::Float64Codec;
use crate::codec::Codec;
use crate::error::Result;

/// A complex number backed by two `f32`s.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Complex32 {
    pub re: f32,
    pub im: f32,
}

/// A complex number backed by two `f64`s.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Complex64 {
    pub re: f64,
    pub im: f64,
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Complex64Codec;

impl Codec for Complex64Codec {
    type Value = Complex32;
    const REQUIRES_TERMINATOR: bool = false;

    fn append(&self, dst: &mut Vec<u8>, value: &Complex32) {
        Float32Codec.append(dst, &value.re);
        Float32Codec.append(dst, &value.im);
    }

    fn put(&self, dst: &mut [u8], value: &Complex32) -> usize {
        let re_n = Float32Codec.put(dst, &value.re);
        let im_n = Float32Codec.put(&mut dst[re_n..], &value.im);
        re_n + im_n
    }

    fn get(&self, src: &[u8]) -> Result<(Complex32, usize)> {
        let (re, re_n) = Float32Codec.get(src)?;
        let (im, im_n) = Float32Codec.get(&src[re_n..])?;
        Ok((Complex32 { re, im }, re_n + im_n))
    }

    fn write<W: Write>(&self, w: &mut W, value: &Complex32) -> Result<()> {
        Float32Codec.write(w, &value.re)?;
        Float32Codec.write(w, &value.im)
    }

    fn read<R: Read>(&self, r: &mut R) -> Result<Complex32> {
        let re = Float32Codec.read(r)?;
        let im = Float32Codec.read(r)?;
        Ok(Complex32 { re, im })
    }

    fn encoded_len(&self, _value: &Complex32) -> usize {
        8
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Complex128Codec;

impl Codec for Complex128Codec {
    type Value = Complex64;
    const REQUIRES_TERMINATOR: bool = false;

    fn append(&self, dst: &mut Vec<u8>, value: &Complex64) {
        Float64Codec.append(dst, &value.re);
        Float64Codec.append(dst, &value.im);
    }

    fn put(&self, dst: &mut [u8], value: &Complex64) -> usize {
        let re_n = Float64Codec.put(dst, &value.re);
        let im_n = Float64Codec.put(&mut dst[re_n..], &value.im);
        re_n + im_n
    }

    fn get(&self, src: &[u8]) -> Result<(Complex64, usize)> {
        let (re, re_n) = Float64Codec.get(src)?;
        let (im, im_n) = Float64Codec.get(&src[re_n..])?;
        Ok((Complex64 { re, im }, re_n + im_n))
    }

    fn write<W: Write>(&self, w: &mut W, value: &Complex64) -> Result<()> {
        Float64Codec.write(w, &value.re)?;
        Float64Codec.write(w, &value.im)
    }

    fn read<R: Read>(&self, r: &mut R) -> Result<Complex64> {
        let re = Float64Codec.read(r)?;
        let im = Float64Codec.read(r)?;
        Ok(Complex64 { re, im })
    }

    fn encoded_len(&self, _value: &Complex64) -> usize {
        16
    }
}
