use std::ops::Deref;

cfg_if! {
	if #[cfg(feature = "multithreaded")] {
		pub trait MaybeSendSync: Send + Sync {}
		impl<T: Send + Sync + ?Sized> MaybeSendSync for T {}
	} else {
		pub trait MaybeSendSync {}
		impl<T: ?Sized> MaybeSendSync for T {}
	}
}

/// A shared, immutable handle; `Arc` when `multithreaded` is enabled, `Rc` otherwise.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct RefCount<T: ?Sized>(
	#[cfg(feature = "multithreaded")] std::sync::Arc<T>,
	#[cfg(not(feature = "multithreaded"))] std::rc::Rc<T>,
);

#[cfg(feature = "multithreaded")]
sa::assert_impl_all!(RefCount<()>: Send, Sync);

impl<T: ?Sized> RefCount<T> {
	/// Whether `self` and `rhs` point to the same allocation.
	pub fn ptr_eq(&self, rhs: &Self) -> bool {
		#[cfg(feature = "multithreaded")]
		{
			std::sync::Arc::ptr_eq(&self.0, &rhs.0)
		}
		#[cfg(not(feature = "multithreaded"))]
		{
			std::rc::Rc::ptr_eq(&self.0, &rhs.0)
		}
	}
}

impl<T: ?Sized> Clone for RefCount<T> {
	fn clone(&self) -> Self {
		Self(self.0.clone())
	}
}

impl<T> From<T> for RefCount<T> {
	fn from(inp: T) -> Self {
		Self(inp.into())
	}
}

impl<T: ?Sized> Deref for RefCount<T> {
	type Target = T;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
